//! Filter evaluation over record collections
//!
//! Both the structured and the natural-language query paths end here, so a
//! given [`Filter`] always selects the same records regardless of how it was
//! produced.

use crate::models::{Filter, StringRecord};

/// Applies filters to records
pub struct FilterExecutor;

impl FilterExecutor {
    /// Keep the records matching every present field of `filter`, in input order.
    pub fn apply(records: &[StringRecord], filter: &Filter) -> Vec<StringRecord> {
        if filter.is_empty() {
            return records.to_vec();
        }

        let needle = filter.contains_character.as_ref().map(|s| s.to_lowercase());

        records
            .iter()
            .filter(|record| Self::matches_with(record, filter, needle.as_deref()))
            .cloned()
            .collect()
    }

    /// Check a single record against `filter`
    pub fn matches(record: &StringRecord, filter: &Filter) -> bool {
        let needle = filter.contains_character.as_ref().map(|s| s.to_lowercase());
        Self::matches_with(record, filter, needle.as_deref())
    }

    fn matches_with(record: &StringRecord, filter: &Filter, needle: Option<&str>) -> bool {
        let length = record.length() as i64;

        if let Some(expected) = filter.is_palindrome {
            if record.is_palindrome() != expected {
                return false;
            }
        }
        if let Some(min) = filter.min_length {
            if length < min {
                return false;
            }
        }
        if let Some(max) = filter.max_length {
            if length > max {
                return false;
            }
        }
        if let Some(count) = filter.word_count {
            if record.word_count() as i64 != count {
                return false;
            }
        }
        if let Some(needle) = needle {
            if !record.value.to_lowercase().contains(needle) {
                return false;
            }
        }

        true
    }
}

impl Filter {
    /// Check a single record against this filter
    pub fn matches(&self, record: &StringRecord) -> bool {
        FilterExecutor::matches(record, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::query::{PhraseParser, StructuredFilterParser};
    use std::collections::HashMap;

    fn record(value: &str) -> StringRecord {
        StringRecord::new(value, analyze(value))
    }

    fn corpus() -> Vec<StringRecord> {
        ["racecar", "hello world", "Level", "a", "banana split", "Zebra", "noon", "abcdefghijkl"]
            .iter()
            .map(|s| record(s))
            .collect()
    }

    fn values(records: &[StringRecord]) -> Vec<&str> {
        records.iter().map(|r| r.value.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let records = corpus();
        assert_eq!(FilterExecutor::apply(&records, &Filter::new()), records);
    }

    #[test]
    fn test_palindrome_filter_preserves_order() {
        let records = corpus();
        let hits = FilterExecutor::apply(&records, &Filter::new().palindrome(true));
        assert_eq!(values(&hits), vec!["racecar", "Level", "a", "noon"]);

        let misses = FilterExecutor::apply(&records, &Filter::new().palindrome(false));
        assert_eq!(misses.len() + hits.len(), records.len());
    }

    #[test]
    fn test_length_bounds_inclusive() {
        let records = corpus();
        let hits = FilterExecutor::apply(&records, &Filter::new().min_length(5).max_length(7));
        assert_eq!(values(&hits), vec!["racecar", "Level", "Zebra"]);
    }

    #[test]
    fn test_negative_bounds_match_nothing() {
        let records = corpus();
        assert!(FilterExecutor::apply(&records, &Filter::new().max_length(-1)).is_empty());
        assert!(FilterExecutor::apply(&records, &Filter::new().word_count(-2)).is_empty());
    }

    #[test]
    fn test_word_count_exact() {
        let records = corpus();
        let hits = FilterExecutor::apply(&records, &Filter::new().word_count(2));
        assert_eq!(values(&hits), vec!["hello world", "banana split"]);
    }

    #[test]
    fn test_contains_is_case_insensitive_substring() {
        let records = corpus();
        let hits = FilterExecutor::apply(&records, &Filter::new().contains("Z"));
        assert_eq!(values(&hits), vec!["Zebra"]);

        let hits = FilterExecutor::apply(&records, &Filter::new().contains("AN"));
        assert_eq!(values(&hits), vec!["banana split"]);

        let hits = FilterExecutor::apply(&records, &Filter::new().contains("lo w"));
        assert_eq!(values(&hits), vec!["hello world"]);
    }

    #[test]
    fn test_merge_is_conjunction() {
        let filters = vec![
            Filter::new().palindrome(true),
            Filter::new().min_length(4),
            Filter::new().word_count(1),
            Filter::new().contains("e"),
            Filter::new().max_length(5),
        ];

        for r in corpus() {
            for f1 in &filters {
                for f2 in &filters {
                    let merged = f1.clone().merge(f2.clone());
                    let both = f1.matches(&r) && f2.matches(&r);
                    assert_eq!(
                        !FilterExecutor::apply(std::slice::from_ref(&r), &merged).is_empty(),
                        both,
                        "record {:?} with {:?} and {:?}",
                        r.value,
                        f1,
                        f2
                    );
                }
            }
        }
    }

    #[test]
    fn test_phrase_and_structured_agree() {
        let records = corpus();
        let phrase = PhraseParser::parse("single word strings").unwrap().parsed_filters;
        let structured = StructuredFilterParser::parse(&HashMap::from([(
            "word_count".to_string(),
            "1".to_string(),
        )]))
        .unwrap();

        assert_eq!(phrase, structured);
        assert_eq!(
            FilterExecutor::apply(&records, &phrase),
            FilterExecutor::apply(&records, &structured)
        );
    }
}
