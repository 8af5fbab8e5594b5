//! Invariant checking over store snapshots
//!
//! Each invariant inspects a full snapshot of the record collection (as
//! returned by `RecordStore::load_all`) and reports a [`Violation`] when the
//! stored data disagrees with what the analyzer would produce today.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::analyzer::{analyze, canonicalize, fingerprint};
use crate::models::StringRecord;

/// A violation of an invariant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub invariant: String,
    pub description: String,
    pub violating_records: Vec<usize>, // Indices into the snapshot
    pub context: HashMap<String, String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INVARIANT VIOLATION: {}", self.invariant)?;
        writeln!(f, "  Description: {}", self.description)?;
        writeln!(f, "  Violating records: {:?}", self.violating_records)?;
        if !self.context.is_empty() {
            writeln!(f, "  Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "    {}: {}", key, value)?;
            }
        }
        Ok(())
    }
}

/// Trait for invariant checkers
pub trait Invariant: Send + Sync {
    /// Name of the invariant
    fn name(&self) -> &str;

    /// Check the invariant against a snapshot
    fn check(&self, records: &[StringRecord]) -> Result<(), Violation>;

    /// Human-readable description
    fn description(&self) -> &str {
        "No description provided"
    }
}

/// Check all invariants and return violations
pub fn check_all_invariants(
    records: &[StringRecord],
    invariants: &[Box<dyn Invariant>],
) -> Vec<Violation> {
    invariants
        .iter()
        .filter_map(|invariant| invariant.check(records).err())
        .collect()
}

/// The invariants every store snapshot must satisfy
pub fn default_invariants() -> Vec<Box<dyn Invariant>> {
    vec![
        Box::new(FingerprintMatchesValue),
        Box::new(PropertiesAreCanonical),
        Box::new(UniqueFingerprints),
    ]
}

fn violation(
    invariant: &dyn Invariant,
    violating_records: Vec<usize>,
    context: HashMap<String, String>,
) -> Violation {
    Violation {
        invariant: invariant.name().to_string(),
        description: invariant.description().to_string(),
        violating_records,
        context,
    }
}

/// Invariant: a record's id is the fingerprint of its stored value
pub struct FingerprintMatchesValue;

impl Invariant for FingerprintMatchesValue {
    fn name(&self) -> &str {
        "FingerprintMatchesValue"
    }

    fn description(&self) -> &str {
        "Record id and sha256_hash must equal the SHA-256 of the stored value"
    }

    fn check(&self, records: &[StringRecord]) -> Result<(), Violation> {
        let mut bad = Vec::new();
        let mut context = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            let expected = fingerprint(&record.value);
            if record.id != expected || record.properties.sha256_hash != expected {
                context.insert(format!("record_{}", i), format!("expected {}", expected));
                bad.push(i);
            }
        }

        if bad.is_empty() {
            Ok(())
        } else {
            Err(violation(self, bad, context))
        }
    }
}

/// Invariant: stored values are canonical and their properties are current
pub struct PropertiesAreCanonical;

impl Invariant for PropertiesAreCanonical {
    fn name(&self) -> &str {
        "PropertiesAreCanonical"
    }

    fn description(&self) -> &str {
        "Stored values are trimmed and their properties equal a fresh analysis"
    }

    fn check(&self, records: &[StringRecord]) -> Result<(), Violation> {
        let mut bad = Vec::new();
        let mut context = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            if canonicalize(&record.value) != record.value {
                context.insert(format!("record_{}", i), "value not trimmed".to_string());
                bad.push(i);
            } else if analyze(&record.value) != record.properties {
                context.insert(format!("record_{}", i), "stale properties".to_string());
                bad.push(i);
            }
        }

        if bad.is_empty() {
            Ok(())
        } else {
            Err(violation(self, bad, context))
        }
    }
}

/// Invariant: no fingerprint appears twice
pub struct UniqueFingerprints;

impl Invariant for UniqueFingerprints {
    fn name(&self) -> &str {
        "UniqueFingerprints"
    }

    fn description(&self) -> &str {
        "Each fingerprint is stored at most once"
    }

    fn check(&self, records: &[StringRecord]) -> Result<(), Violation> {
        let mut seen = HashSet::new();
        let mut bad = Vec::new();
        let mut context = HashMap::new();

        for (i, record) in records.iter().enumerate() {
            if !seen.insert(record.id.as_str()) {
                context.insert(format!("record_{}", i), record.id.clone());
                bad.push(i);
            }
        }

        if bad.is_empty() {
            Ok(())
        } else {
            Err(violation(self, bad, context))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: &str) -> StringRecord {
        StringRecord::new(value, analyze(value))
    }

    #[test]
    fn test_clean_snapshot_passes() {
        let records = vec![record("a"), record("hello world"), record("")];
        assert!(check_all_invariants(&records, &default_invariants()).is_empty());
    }

    #[test]
    fn test_tampered_value_detected() {
        let mut tampered = record("hello");
        tampered.value = "jello".to_string();

        let violations = check_all_invariants(&[record("a"), tampered], &default_invariants());
        let names: Vec<&str> = violations.iter().map(|v| v.invariant.as_str()).collect();
        assert!(names.contains(&"FingerprintMatchesValue"));
        assert!(names.contains(&"PropertiesAreCanonical"));
        assert_eq!(violations[0].violating_records, vec![1]);
    }

    #[test]
    fn test_untrimmed_value_detected() {
        let mut r = record("padded");
        r.value = " padded ".to_string();
        assert!(PropertiesAreCanonical.check(&[r]).is_err());
    }

    #[test]
    fn test_duplicates_detected() {
        let err = UniqueFingerprints
            .check(&[record("x"), record("y"), record("x")])
            .unwrap_err();
        assert_eq!(err.violating_records, vec![2]);
        assert!(err.to_string().contains("UniqueFingerprints"));
    }
}
