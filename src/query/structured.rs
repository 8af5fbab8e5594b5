//! Structured filter construction from query parameters

use std::collections::HashMap;

use crate::error::{AnalyzerError, ValidationKind};
use crate::models::Filter;
use crate::Result;

pub const IS_PALINDROME: &str = "is_palindrome";
pub const MIN_LENGTH: &str = "min_length";
pub const MAX_LENGTH: &str = "max_length";
pub const WORD_COUNT: &str = "word_count";
pub const CONTAINS_CHARACTER: &str = "contains_character";

/// Builds a [`Filter`] from stringly-typed query parameters.
///
/// Every recognized parameter is converted to its typed value before it
/// reaches the filter; unrecognized parameters are ignored.
pub struct StructuredFilterParser;

impl StructuredFilterParser {
    pub fn parse(params: &HashMap<String, String>) -> Result<Filter> {
        let mut filter = Filter::new();

        if let Some(raw) = params.get(IS_PALINDROME) {
            filter.is_palindrome = Some(Self::parse_bool(IS_PALINDROME, raw)?);
        }
        if let Some(raw) = params.get(MIN_LENGTH) {
            filter.min_length = Some(Self::parse_int(MIN_LENGTH, raw)?);
        }
        if let Some(raw) = params.get(MAX_LENGTH) {
            filter.max_length = Some(Self::parse_int(MAX_LENGTH, raw)?);
        }
        if let Some(raw) = params.get(WORD_COUNT) {
            filter.word_count = Some(Self::parse_int(WORD_COUNT, raw)?);
        }
        if let Some(raw) = params.get(CONTAINS_CHARACTER) {
            if raw.is_empty() {
                return Err(AnalyzerError::validation(
                    ValidationKind::InvalidString,
                    format!("{} must be a non-empty string", CONTAINS_CHARACTER),
                ));
            }
            filter.contains_character = Some(raw.clone());
        }

        Ok(filter)
    }

    fn parse_bool(name: &str, raw: &str) -> Result<bool> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(AnalyzerError::validation(
                ValidationKind::InvalidBoolean,
                format!("{} must be 'true' or 'false'", name),
            )),
        }
    }

    fn parse_int(name: &str, raw: &str) -> Result<i64> {
        raw.trim().parse::<i64>().map_err(|_| {
            AnalyzerError::validation(
                ValidationKind::InvalidInteger,
                format!("{} must be an integer, got '{}'", name, raw),
            )
        })
    }
}
