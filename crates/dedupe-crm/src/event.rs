use crate::{CrmError, Result};
use dedupe_core::ContactId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const MERGE_STATUS_MESSAGE: &str = "Merge complete or skipped. See logs for details.";
pub const STATUS_FIELD: &str = "status";

/// Payload a workflow host hands to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEvent {
    pub object: Option<EventObject>,
    #[serde(default)]
    pub input_fields: InputFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventObject {
    pub object_id: ContactId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InputFields {
    /// Kept as sent; hosts pass blanks and other non-numeric values here.
    pub hs_object_id: Option<Value>,
    pub phone: Option<String>,
    pub mobilephone: Option<String>,
}

impl InputFields {
    /// `hs_object_id` as a contact id, when it holds one.
    pub fn object_id(&self) -> Option<ContactId> {
        match self.hs_object_id.as_ref()? {
            Value::Number(number) => number.as_u64().map(ContactId),
            Value::String(raw) => raw.parse().ok(),
            _ => None,
        }
    }
}

impl WorkflowEvent {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| CrmError::Event(err.to_string()))
    }

    /// The enrolled record: `object.objectId`, else the `hs_object_id` input.
    pub fn subject_id(&self) -> Option<ContactId> {
        self.object
            .as_ref()
            .map(|object| object.object_id)
            .or_else(|| self.input_fields.object_id())
    }
}

/// Result handed back to the workflow host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub output_fields: BTreeMap<String, String>,
}

impl CallbackPayload {
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.output_fields.insert(name.into(), value.into());
        self
    }

    pub fn merge_status() -> Self {
        Self::default().with_field(STATUS_FIELD, MERGE_STATUS_MESSAGE)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.output_fields.get(name).map(String::as_str)
    }
}
