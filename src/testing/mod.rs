//! Testing infrastructure for correctness verification
//!
//! Invariants are checked against a full snapshot of the store:
//!
//! ```rust,ignore
//! use string_analyzer::testing::prelude::*;
//!
//! let snapshot = store.load_all()?;
//! let violations = check_all_invariants(&snapshot, &default_invariants());
//! assert!(violations.is_empty());
//! ```
//!
//! - **FingerprintMatchesValue**: ids are the SHA-256 of the stored value
//! - **PropertiesAreCanonical**: values are trimmed and properties are fresh
//! - **UniqueFingerprints**: no fingerprint is stored twice

pub mod invariants;

pub use invariants::{
    check_all_invariants, default_invariants, FingerprintMatchesValue, Invariant,
    PropertiesAreCanonical, UniqueFingerprints, Violation,
};

/// Prelude for easy imports
pub mod prelude {
    pub use super::invariants::{check_all_invariants, default_invariants, Invariant, Violation};
}
