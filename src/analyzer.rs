//! String property analysis.
//!
//! The analyzer maps a string to its canonical form (leading and trailing
//! whitespace removed, nothing else) and derives every stored property from
//! that form. The fingerprint is the SHA-256 of the canonical form's UTF-8
//! bytes in original case, hex encoded in lowercase; stored records are keyed
//! by it, so the encoding must never change.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::error::{AnalyzerError, Result};
use crate::models::{Fingerprint, FrequencyMap, StringProperties};

/// Canonical form of a submitted string
pub fn canonicalize(value: &str) -> &str {
    value.trim()
}

/// Analyze a string and return its properties.
///
/// Length, reversal and frequency counts work on Unicode scalar values
/// (`char`), so `"😀"` has length 1 and is a palindrome.
pub fn analyze(value: &str) -> StringProperties {
    let cleaned = canonicalize(value);
    let lowered = cleaned.to_lowercase();

    let reversed: String = lowered.chars().rev().collect();
    let unique: HashSet<char> = lowered.chars().collect();

    StringProperties {
        length: cleaned.chars().count(),
        is_palindrome: lowered == reversed,
        unique_characters: unique.len(),
        word_count: cleaned.split_whitespace().count(),
        sha256_hash: fingerprint(value),
        character_frequency_map: frequency_map(cleaned),
    }
}

/// Analyze a JSON value, rejecting anything that is not a string.
pub fn analyze_value(value: &serde_json::Value) -> Result<StringProperties> {
    match value.as_str() {
        Some(s) => Ok(analyze(s)),
        None => Err(AnalyzerError::InvalidInput(
            "'value' must be a string".to_string(),
        )),
    }
}

/// Fingerprint of the canonical form of `value`
pub fn fingerprint(value: &str) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(canonicalize(value).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn frequency_map(cleaned: &str) -> FrequencyMap {
    let mut map = FrequencyMap::new();
    for c in cleaned.chars() {
        *map.entry(c.to_lowercase().collect()).or_insert(0) += 1;
    }
    map
}
