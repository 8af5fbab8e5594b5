//! Persistence: the record store interface and its implementations.
//!
//! [`DocStore`] is the durable fjall-backed store used by the server;
//! [`MemoryStore`] keeps everything in process memory.

mod doc_store;
mod memory;

pub use doc_store::DocStore;
pub use memory::MemoryStore;

use crate::models::StringRecord;
use crate::Result;

/// Storage for string records keyed by fingerprint.
///
/// Implementations return records from `load_all` in insertion order. Writes
/// are not coordinated by the store; callers serialize create and delete.
pub trait RecordStore: Send + Sync {
    fn get(&self, fingerprint: &str) -> Result<Option<StringRecord>>;

    fn contains(&self, fingerprint: &str) -> Result<bool> {
        Ok(self.get(fingerprint)?.is_some())
    }

    /// Persist a new record. Overwrites any record with the same fingerprint.
    fn insert(&self, record: &StringRecord) -> Result<()>;

    /// Remove a record, returning whether it existed.
    fn remove(&self, fingerprint: &str) -> Result<bool>;

    /// Full snapshot of the collection.
    fn load_all(&self) -> Result<Vec<StringRecord>>;

    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
