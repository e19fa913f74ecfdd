//! JSON bodies exchanged with the CRM contact API.

use crate::Result;
use dedupe_core::{ContactId, PropertyBag};
use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct ContactResponse {
    #[serde(default)]
    properties: Option<BTreeMap<String, Option<String>>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: ContactId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MergeRequest {
    vid_to_merge: ContactId,
}

pub fn parse_contact_response(body: &str) -> Result<Option<PropertyBag>> {
    let response: ContactResponse = serde_json::from_str(body)?;
    Ok(response.properties.map(|properties| {
        properties
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect()
    }))
}

pub fn parse_search_response(body: &str) -> Result<Vec<ContactId>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results.into_iter().map(|hit| hit.id).collect())
}

pub fn merge_request_body(merged: ContactId) -> Result<String> {
    Ok(serde_json::to_string(&MergeRequest {
        vid_to_merge: merged,
    })?)
}

#[cfg(test)]
mod tests {
    use super::{merge_request_body, parse_contact_response, parse_search_response};
    use dedupe_core::ContactId;

    #[test]
    fn parses_contact_properties() {
        let body = r#"{
            "id": "512",
            "properties": {
                "phone": "(555) 123-4567",
                "mobilephone": null,
                "city": "Springfield",
                "hs_object_id": "512"
            },
            "archived": false
        }"#;
        let properties = parse_contact_response(body).expect("parse").expect("properties");
        assert_eq!(
            properties.get("phone").map(String::as_str),
            Some("(555) 123-4567")
        );
        assert!(!properties.contains_key("mobilephone"));
        assert_eq!(
            properties.get("city").map(String::as_str),
            Some("Springfield")
        );
        assert_eq!(
            properties.get("hs_object_id").map(String::as_str),
            Some("512")
        );
    }

    #[test]
    fn contact_without_properties_is_none() {
        assert!(parse_contact_response(r#"{"id": "512"}"#)
            .expect("parse")
            .is_none());
    }

    #[test]
    fn parses_mixed_id_types_in_search_results() {
        let body = r#"{"total": 2, "results": [{"id": "101"}, {"id": 202}]}"#;
        let ids = parse_search_response(body).expect("parse");
        assert_eq!(ids, vec![ContactId(101), ContactId(202)]);
    }

    #[test]
    fn missing_results_is_empty() {
        assert!(parse_search_response("{}").expect("parse").is_empty());
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(parse_search_response(r#"{"results": [{"id": "abc"}]}"#).is_err());
    }

    #[test]
    fn merge_body_carries_merged_id() {
        let body = merge_request_body(ContactId(7)).expect("body");
        assert_eq!(body, r#"{"vidToMerge":7}"#);
    }
}
