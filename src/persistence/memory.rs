use parking_lot::RwLock;

use crate::models::StringRecord;
use crate::persistence::RecordStore;
use crate::Result;

/// Volatile record store
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<StringRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, fingerprint: &str) -> Result<Option<StringRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.id == fingerprint)
            .cloned())
    }

    fn insert(&self, record: &StringRecord) -> Result<()> {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        Ok(())
    }

    fn remove(&self, fingerprint: &str) -> Result<bool> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id != fingerprint);
        Ok(records.len() != before)
    }

    fn load_all(&self) -> Result<Vec<StringRecord>> {
        Ok(self.records.read().clone())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }
}
