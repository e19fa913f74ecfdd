use crate::domain::{ContactFields, ContactId, PropertyBag};
use crate::error::CoreError;
use crate::query::SearchQuery;
use crate::rules::key::{select_dedupe_key, DedupeKey, DedupeSettings, KeySelection};
use crate::rules::matches::{MatchDecision, MatchSet};

/// Dedupe policy bound to a set of CRM property names.
#[derive(Debug, Clone, Default)]
pub struct DedupeKeyResolver {
    settings: DedupeSettings,
}

impl DedupeKeyResolver {
    pub fn new(settings: DedupeSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &DedupeSettings {
        &self.settings
    }

    pub fn contact_properties(&self) -> Vec<&str> {
        self.settings.contact_properties()
    }

    /// Maps a fetched property bag onto typed fields using the configured
    /// phone property names.
    pub fn contact_fields(&self, bag: &PropertyBag) -> ContactFields {
        self.settings.contact_fields(bag)
    }

    pub fn select_key(&self, fields: &ContactFields) -> KeySelection {
        select_dedupe_key(fields)
    }

    pub fn search_query(&self, key: &DedupeKey) -> SearchQuery {
        key.search_query(&self.settings)
    }

    pub fn property_name(&self, key: &DedupeKey) -> &str {
        key.property_name(&self.settings)
    }

    pub fn resolve<I>(&self, subject: ContactId, candidates: I) -> Result<MatchDecision, CoreError>
    where
        I: IntoIterator<Item = ContactId>,
    {
        MatchSet::excluding_subject(subject, candidates).decide()
    }
}
