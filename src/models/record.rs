use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content fingerprint: lowercase hex SHA-256 of the canonical string
pub type Fingerprint = String;

/// Case-insensitive character tally, keyed by the lowercase form of each character
pub type FrequencyMap = BTreeMap<String, usize>;

/// Derived properties of a canonical string
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: Fingerprint,
    pub character_frequency_map: FrequencyMap,
}

/// A stored string with its analysis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Fingerprint of `value`; storage key
    pub id: Fingerprint,
    /// Trimmed form of the submitted string
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Build a record from an already-canonical value and its properties
    pub fn new(value: impl Into<String>, properties: StringProperties) -> Self {
        Self {
            id: properties.sha256_hash.clone(),
            value: value.into(),
            properties,
            created_at: current_timestamp(),
        }
    }

    pub fn fingerprint(&self) -> &str {
        &self.id
    }

    pub fn length(&self) -> usize {
        self.properties.length
    }

    pub fn word_count(&self) -> usize {
        self.properties.word_count
    }

    pub fn is_palindrome(&self) -> bool {
        self.properties.is_palindrome
    }
}

/// Current UTC time, truncated to milliseconds
pub fn current_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(hash: &str) -> StringProperties {
        StringProperties {
            length: 3,
            is_palindrome: true,
            unique_characters: 2,
            word_count: 1,
            sha256_hash: hash.to_string(),
            character_frequency_map: BTreeMap::from([("a".to_string(), 2), ("b".to_string(), 1)]),
        }
    }

    #[test]
    fn test_record_uses_hash_as_id() {
        let record = StringRecord::new("aba", props("deadbeef"));
        assert_eq!(record.fingerprint(), "deadbeef");
        assert_eq!(record.length(), 3);
        assert!(record.is_palindrome());
    }

    #[test]
    fn test_record_wire_shape() {
        let record = StringRecord::new("aba", props("deadbeef"));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "deadbeef");
        assert_eq!(json["value"], "aba");
        assert_eq!(json["properties"]["sha256_hash"], "deadbeef");
        assert_eq!(json["properties"]["character_frequency_map"]["a"], 2);
        assert!(json["created_at"].is_string());
    }
}
