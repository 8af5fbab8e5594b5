//! Natural-language phrase translation.
//!
//! This is pattern matching, not language understanding. The query is
//! lowercased and checked against a fixed list of rules; every rule that
//! matches contributes to the filter. Rules run in declaration order and a
//! later rule overwrites an earlier one that set the same field.
//!
//! | phrase contains                              | effect                        |
//! |----------------------------------------------|-------------------------------|
//! | `palindrome`, `palindromic`                  | `is_palindrome = true`        |
//! | `single word`, `one word`, `single-word`     | `word_count = 1`              |
//! | `longer than N`                              | `min_length = N + 1`          |
//! | `shorter than N`                             | `max_length = N - 1`          |
//! | `contain(s\|ing) the letter X`               | `contains_character = X`      |

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;
use crate::models::Filter;
use crate::Result;

static LONGER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"longer than ([0-9]+)").expect("valid regex"));
static SHORTER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"shorter than ([0-9]+)").expect("valid regex"));
static CONTAINS_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"contain(?:s|ing)? the letter ([a-z0-9_])").expect("valid regex")
});

const PALINDROME_PHRASES: &[&str] = &["palindrome", "palindromic"];
const SINGLE_WORD_PHRASES: &[&str] = &["single word", "one word", "single-word"];

/// A natural-language query together with the filter derived from it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: Filter,
}

/// Translates free-text queries into filters
pub struct PhraseParser;

impl PhraseParser {
    pub fn parse(query: &str) -> Result<InterpretedQuery> {
        let q = query.to_lowercase();
        let mut filter = Filter::new();

        if PALINDROME_PHRASES.iter().any(|p| q.contains(p)) {
            filter.is_palindrome = Some(true);
        }

        if SINGLE_WORD_PHRASES.iter().any(|p| q.contains(p)) {
            filter.word_count = Some(1);
        }

        if let Some(n) = Self::capture_number(&LONGER_THAN, &q) {
            filter.min_length = Some(n.saturating_add(1));
        }

        if let Some(n) = Self::capture_number(&SHORTER_THAN, &q) {
            filter.max_length = Some(n.saturating_sub(1));
        }

        if let Some(caps) = CONTAINS_LETTER.captures(&q) {
            filter.contains_character = Some(caps[1].to_string());
        }

        if filter.is_empty() {
            return Err(AnalyzerError::UnparseableQuery(query.to_string()));
        }

        Ok(InterpretedQuery {
            original: query.to_string(),
            parsed_filters: filter,
        })
    }

    fn capture_number(re: &Regex, q: &str) -> Option<i64> {
        let caps = re.captures(q)?;
        // Digit runs too long for i64 saturate instead of failing the query.
        Some(caps[1].parse::<i64>().unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_for(query: &str) -> Filter {
        PhraseParser::parse(query).unwrap().parsed_filters
    }

    #[test]
    fn test_palindrome_phrases() {
        assert_eq!(filter_for("all palindromic strings"), Filter::new().palindrome(true));
        assert_eq!(filter_for("Palindromes please"), Filter::new().palindrome(true));
    }

    #[test]
    fn test_single_word() {
        for q in ["single word strings", "one word only", "single-word values"] {
            assert_eq!(filter_for(q), Filter::new().word_count(1), "query {:?}", q);
        }
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(filter_for("longer than 10").min_length, Some(11));
        assert_eq!(filter_for("shorter than 5").max_length, Some(4));
        assert_eq!(filter_for("strings longer than 10 characters").min_length, Some(11));
    }

    #[test]
    fn test_huge_numbers_saturate() {
        let filter = filter_for("longer than 99999999999999999999999");
        assert_eq!(filter.min_length, Some(i64::MAX));
    }

    #[test]
    fn test_contains_letter() {
        assert_eq!(filter_for("strings containing the letter z").contains_character.as_deref(), Some("z"));
        assert_eq!(filter_for("words that contain the letter Q").contains_character.as_deref(), Some("q"));
        assert_eq!(filter_for("contains the letter a").contains_character.as_deref(), Some("a"));
    }

    #[test]
    fn test_combined_rules() {
        let filter = filter_for("single word palindromic strings longer than 2 containing the letter a");
        assert_eq!(
            filter,
            Filter::new().palindrome(true).word_count(1).min_length(3).contains("a")
        );
    }

    #[test]
    fn test_original_is_preserved() {
        let interpreted = PhraseParser::parse("Single Word strings").unwrap();
        assert_eq!(interpreted.original, "Single Word strings");
    }

    #[test]
    fn test_unparseable() {
        for q in ["", "show me everything", "longer than ten"] {
            assert!(matches!(
                PhraseParser::parse(q),
                Err(AnalyzerError::UnparseableQuery(_))
            ));
        }
    }
}
