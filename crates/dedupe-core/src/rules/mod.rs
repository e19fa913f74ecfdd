pub mod key;
pub mod matches;
pub mod phone_writer;
pub mod resolver;

pub use key::{
    select_dedupe_key, validate_property_name, DedupeField, DedupeKey, DedupeSettings,
    KeySelection, DEFAULT_ADDRESS_PROPERTY, DEFAULT_MOBILE_PROPERTY,
    DEFAULT_NORMALIZED_PHONE_PROPERTY, DEFAULT_PHONE_PROPERTY,
};
pub use matches::{resolve_matches, MatchDecision, MatchSet};
pub use phone_writer::select_normalized_phone;
pub use resolver::DedupeKeyResolver;
