use serde::{Deserialize, Serialize};

use crate::models::{Filter, StringRecord};
use crate::query::InterpretedQuery;

/// Body field holding the string to create.
///
/// The body is read as raw JSON so that a missing field (400) and a
/// non-string value (422) can be told apart:
/// ```json
/// { "value": "A man a plan a canal Panama" }
/// ```
pub const CREATE_VALUE_FIELD: &str = "value";

/// Query parameters of the natural-language endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NaturalLanguageParams {
    #[serde(default)]
    pub query: Option<String>,
}

/// Response for a structured listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: Filter,
}

impl ListResponse {
    pub fn new(data: Vec<StringRecord>, filters_applied: Filter) -> Self {
        Self {
            count: data.len(),
            data,
            filters_applied,
        }
    }
}

/// Response for a natural-language query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

impl NaturalLanguageResponse {
    pub fn new(data: Vec<StringRecord>, interpreted_query: InterpretedQuery) -> Self {
        Self {
            count: data.len(),
            data,
            interpreted_query,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_strings: usize,
}

/// API Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
