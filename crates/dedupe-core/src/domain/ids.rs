use crate::error::CoreError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric CRM object id.
///
/// The CRM hands ids back as strings in some payloads and as numbers in
/// others, so deserialization accepts both and equality is always numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl ContactId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ContactId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidContactId(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| CoreError::InvalidContactId(s.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContactId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawContactId::deserialize(deserializer)? {
            RawContactId::Number(value) => Ok(Self(value)),
            RawContactId::Text(value) => value.parse().map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ContactId;

    #[test]
    fn parse_accepts_padded_and_zero_prefixed_ids() {
        assert_eq!(" 0101 ".parse::<ContactId>().unwrap(), ContactId(101));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!("abc".parse::<ContactId>().is_err());
        assert!("".parse::<ContactId>().is_err());
        assert!("-5".parse::<ContactId>().is_err());
    }

    #[test]
    fn deserializes_from_string_or_number() {
        let from_text: ContactId = serde_json::from_str("\"202\"").unwrap();
        let from_number: ContactId = serde_json::from_str("202").unwrap();
        assert_eq!(from_text, from_number);
    }

    #[test]
    fn serializes_as_number() {
        let value = serde_json::to_string(&ContactId(42)).unwrap();
        assert_eq!(value, "42");
    }
}
