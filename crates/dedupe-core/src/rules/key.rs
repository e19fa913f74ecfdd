use crate::domain::{
    is_normalized_phone, normalize_address, normalize_phone, ContactFields, PhoneSource,
    PropertyBag, ADDRESS_PROPERTIES,
};
use crate::error::CoreError;
use crate::query::SearchQuery;

pub const DEFAULT_PHONE_PROPERTY: &str = "phone";
pub const DEFAULT_MOBILE_PROPERTY: &str = "mobilephone";
pub const DEFAULT_ADDRESS_PROPERTY: &str = "ca_normalized_address";
pub const DEFAULT_NORMALIZED_PHONE_PROPERTY: &str = "normalized_phone";

/// CRM property names the dedupe searches run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeSettings {
    pub phone_property: String,
    pub mobile_property: String,
    pub address_property: String,
}

impl Default for DedupeSettings {
    fn default() -> Self {
        Self {
            phone_property: DEFAULT_PHONE_PROPERTY.to_string(),
            mobile_property: DEFAULT_MOBILE_PROPERTY.to_string(),
            address_property: DEFAULT_ADDRESS_PROPERTY.to_string(),
        }
    }
}

impl DedupeSettings {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_property_name(&self.phone_property)?;
        validate_property_name(&self.mobile_property)?;
        validate_property_name(&self.address_property)?;
        Ok(())
    }

    /// Properties to request when loading a contact: the configured phone
    /// pair followed by the postal address parts.
    pub fn contact_properties(&self) -> Vec<&str> {
        let mut properties = vec![self.phone_property.as_str()];
        if self.mobile_property != self.phone_property {
            properties.push(self.mobile_property.as_str());
        }
        for name in ADDRESS_PROPERTIES {
            if !properties.contains(&name) {
                properties.push(name);
            }
        }
        properties
    }

    pub fn contact_fields(&self, bag: &PropertyBag) -> ContactFields {
        ContactFields::from_properties(bag, &self.phone_property, &self.mobile_property)
    }
}

pub fn validate_property_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(CoreError::InvalidPropertyName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupeField {
    Phone,
    Address,
}

impl DedupeField {
    pub const fn as_str(self) -> &'static str {
        match self {
            DedupeField::Phone => "phone",
            DedupeField::Address => "address",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeKey {
    pub field: DedupeField,
    pub value: String,
}

impl DedupeKey {
    /// The property holding the key on the CRM side. Phone keys are also
    /// matched against the mobile property; see [`DedupeKey::search_query`].
    pub fn property_name<'a>(&self, settings: &'a DedupeSettings) -> &'a str {
        match self.field {
            DedupeField::Phone => &settings.phone_property,
            DedupeField::Address => &settings.address_property,
        }
    }

    pub fn search_query(&self, settings: &DedupeSettings) -> SearchQuery {
        match self.field {
            DedupeField::Phone => SearchQuery::any_eq(
                [
                    settings.phone_property.as_str(),
                    settings.mobile_property.as_str(),
                ],
                &self.value,
            ),
            DedupeField::Address => {
                SearchQuery::any_eq([settings.address_property.as_str()], &self.value)
            }
        }
    }
}

/// Everything the selector derived for one contact, kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySelection {
    pub key: Option<DedupeKey>,
    pub phone_source: Option<PhoneSource>,
    pub normalized_phone: String,
    pub normalized_address: String,
}

pub fn select_dedupe_key(fields: &ContactFields) -> KeySelection {
    let (phone_source, normalized_phone) = match fields.raw_phone() {
        Some((source, raw)) => (Some(source), normalize_phone(raw)),
        None => (None, String::new()),
    };
    let [street, city, state, zip] = fields.address_parts();
    let normalized_address = normalize_address(street, city, state, zip);

    let key = if is_normalized_phone(&normalized_phone) {
        Some(DedupeKey {
            field: DedupeField::Phone,
            value: normalized_phone.clone(),
        })
    } else if !normalized_address.is_empty() {
        Some(DedupeKey {
            field: DedupeField::Address,
            value: normalized_address.clone(),
        })
    } else {
        None
    };

    KeySelection {
        key,
        phone_source,
        normalized_phone,
        normalized_address,
    }
}
