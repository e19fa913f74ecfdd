use dedupe_core::{ContactId, CoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid event: {0}")]
    Event(String),
    #[error("crm request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Unavailable(String),
    #[cfg(feature = "http-client")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "http-client")]
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, CrmError>;

impl CrmError {
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, CrmError::Core(err) if err.is_ambiguous())
    }

    pub fn ambiguous_candidates(&self) -> Option<&[ContactId]> {
        match self {
            CrmError::Core(CoreError::AmbiguousMatch { candidates }) => Some(candidates.as_slice()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CrmError::Status { status: 404, .. })
    }
}
