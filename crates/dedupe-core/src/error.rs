use crate::domain::ContactId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid contact id: {0}")]
    InvalidContactId(String),
    #[error("invalid property name: {0}")]
    InvalidPropertyName(String),
    #[error(
        "ambiguous merge; {} matching contacts: {}",
        .candidates.len(),
        join_ids(.candidates)
    )]
    AmbiguousMatch { candidates: Vec<ContactId> },
}

impl CoreError {
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, CoreError::AmbiguousMatch { .. })
    }
}

fn join_ids(ids: &[ContactId]) -> String {
    ids.iter()
        .map(ContactId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
