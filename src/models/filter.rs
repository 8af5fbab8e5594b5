use serde::{Deserialize, Serialize};

/// Conjunctive filter over string records.
///
/// Every field is optional and an empty filter matches everything. Absent
/// fields are omitted when serialized, so a filter can be echoed back to the
/// caller as the set of constraints that were actually applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,

    /// Inclusive lower bound on length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,

    /// Inclusive upper bound on length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<i64>,

    /// Case-insensitive substring, not limited to a single character
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palindrome(mut self, is_palindrome: bool) -> Self {
        self.is_palindrome = Some(is_palindrome);
        self
    }

    pub fn min_length(mut self, min: i64) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: i64) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn word_count(mut self, count: i64) -> Self {
        self.word_count = Some(count);
        self
    }

    pub fn contains(mut self, needle: impl Into<String>) -> Self {
        self.contains_character = Some(needle.into());
        self
    }

    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Combine two filters; fields set on `other` win.
    pub fn merge(mut self, other: Filter) -> Self {
        if other.is_palindrome.is_some() {
            self.is_palindrome = other.is_palindrome;
        }
        if other.min_length.is_some() {
            self.min_length = other.min_length;
        }
        if other.max_length.is_some() {
            self.max_length = other.max_length;
        }
        if other.word_count.is_some() {
            self.word_count = other.word_count;
        }
        if other.contains_character.is_some() {
            self.contains_character = other.contains_character;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_builders() {
        let filter = Filter::new().palindrome(true).min_length(3).contains("a");
        assert_eq!(filter.is_palindrome, Some(true));
        assert_eq!(filter.min_length, Some(3));
        assert_eq!(filter.contains_character.as_deref(), Some("a"));
        assert!(filter.max_length.is_none());
        assert!(!filter.is_empty());
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn test_merge_right_wins() {
        let left = Filter::new().min_length(5).word_count(2);
        let right = Filter::new().min_length(11).palindrome(false);

        let merged = left.merge(right);
        assert_eq!(merged.min_length, Some(11));
        assert_eq!(merged.word_count, Some(2));
        assert_eq!(merged.is_palindrome, Some(false));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let json = serde_json::to_value(Filter::new().word_count(1).palindrome(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "is_palindrome": true, "word_count": 1 }));
        assert_eq!(serde_json::to_value(Filter::new()).unwrap(), serde_json::json!({}));
    }
}
