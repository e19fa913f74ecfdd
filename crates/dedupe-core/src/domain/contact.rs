use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Postal address properties, in the order they are joined for the key.
pub const ADDRESS_PROPERTIES: [&str; 4] = ["address", "city", "state", "zip"];

/// Raw CRM properties keyed by property name. `null` values are left out.
pub type PropertyBag = BTreeMap<String, String>;

/// The subset of a CRM contact record used for deduplication.
///
/// Unknown properties are ignored and `null` reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub phone: Option<String>,
    pub mobilephone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneSource {
    Phone,
    MobilePhone,
}

impl PhoneSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            PhoneSource::Phone => "phone",
            PhoneSource::MobilePhone => "mobilephone",
        }
    }
}

impl ContactFields {
    /// Reads the phone pair from the given property names and the address
    /// parts from [`ADDRESS_PROPERTIES`].
    pub fn from_properties(
        bag: &PropertyBag,
        phone_property: &str,
        mobile_property: &str,
    ) -> Self {
        let get = |name: &str| bag.get(name).cloned();
        let [address, city, state, zip] = ADDRESS_PROPERTIES;
        Self {
            phone: get(phone_property),
            mobilephone: get(mobile_property),
            address: get(address),
            city: get(city),
            state: get(state),
            zip: get(zip),
        }
    }

    /// Picks the raw phone value used for dedupe. `mobilephone` is consulted
    /// only when `phone` is missing or empty.
    pub fn raw_phone(&self) -> Option<(PhoneSource, &str)> {
        if let Some(phone) = present(&self.phone) {
            return Some((PhoneSource::Phone, phone));
        }
        present(&self.mobilephone).map(|mobile| (PhoneSource::MobilePhone, mobile))
    }

    pub fn address_parts(&self) -> [Option<&str>; 4] {
        [
            self.address.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.zip.as_deref(),
        ]
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
