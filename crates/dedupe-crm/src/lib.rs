pub mod api;
pub mod error;
pub mod event;
pub mod http;
pub mod wire;
pub mod workflow;

pub use api::ContactApi;
pub use error::{CrmError, Result};
pub use event::{CallbackPayload, InputFields, WorkflowEvent, MERGE_STATUS_MESSAGE};
pub use http::{HttpContactApi, HttpOptions};
pub use workflow::{normalize_phone_fields, DedupeOutcome, DedupeWorkflow, SkipReason};
