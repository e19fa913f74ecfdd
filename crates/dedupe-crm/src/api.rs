use crate::Result;
use dedupe_core::{ContactId, PropertyBag, SearchQuery};

/// The three CRM operations the dedupe workflow needs.
pub trait ContactApi {
    /// Returns `None` when the record comes back without a property bag.
    fn fetch_contact(&self, id: ContactId, properties: &[&str]) -> Result<Option<PropertyBag>>;

    /// Ids of every contact matching the query, in CRM order.
    fn search_contacts(&self, query: &SearchQuery) -> Result<Vec<ContactId>>;

    /// Folds `merged` into `target`; `target` survives.
    fn merge_contacts(&self, target: ContactId, merged: ContactId) -> Result<()>;
}

