use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use fjall::{Database, Keyspace, KeyspaceCreateOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AnalyzerError;
use crate::models::StringRecord;
use crate::persistence::RecordStore;
use crate::Result;

/// Record plus its insertion sequence, as stored in Fjall.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    seq: u64,
    record: StringRecord,
}

/// Fjall-backed record store.
///
/// `records` maps fingerprint to the bincode-encoded record; `order` maps a
/// big-endian insertion sequence to the fingerprint so that full scans come
/// back in creation order. Both keyspaces change together in one write
/// batch.
pub struct DocStore {
    base_dir: PathBuf,
    db: Database,
    records: Keyspace,
    order: Keyspace,
    next_seq: AtomicU64,
}

const RECORDS_CF: &str = "records";
const ORDER_CF: &str = "order";

fn store_err(e: impl std::fmt::Display) -> AnalyzerError {
    AnalyzerError::Store(e.to_string())
}

impl DocStore {
    pub fn open(base_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_dir).map_err(AnalyzerError::Io)?;
        let db = Database::builder(&base_dir)
            .open()
            .map_err(|e| AnalyzerError::Store(format!("failed to open fjall record store: {}", e)))?;

        let records = db
            .keyspace(RECORDS_CF, || KeyspaceCreateOptions::default())
            .map_err(|e| AnalyzerError::Store(format!("failed to open records cf: {}", e)))?;
        let order = db
            .keyspace(ORDER_CF, || KeyspaceCreateOptions::default())
            .map_err(|e| AnalyzerError::Store(format!("failed to open order cf: {}", e)))?;

        let store = Self {
            base_dir,
            db,
            records,
            order,
            next_seq: AtomicU64::new(0),
        };

        let next = store.max_sequence()?.map_or(0, |seq| seq + 1);
        store.next_seq.store(next, Ordering::SeqCst);
        debug!(path = ?store.base_dir, next_seq = next, "record store opened");

        Ok(store)
    }

    fn encode_seq(seq: u64) -> [u8; 8] {
        seq.to_be_bytes()
    }

    fn decode_seq(bytes: &[u8]) -> Option<u64> {
        let buf: [u8; 8] = bytes.try_into().ok()?;
        Some(u64::from_be_bytes(buf))
    }

    fn max_sequence(&self) -> Result<Option<u64>> {
        let mut max = None;
        for kv in self.order.iter() {
            let key = kv.key().map_err(store_err)?;
            if let Some(seq) = Self::decode_seq(key.as_ref()) {
                max = Some(max.map_or(seq, |m: u64| m.max(seq)));
            }
        }
        Ok(max)
    }

    fn get_stored(&self, fingerprint: &str) -> Result<Option<StoredRecord>> {
        let Some(val) = self
            .records
            .get(fingerprint.as_bytes())
            .map_err(store_err)?
        else {
            return Ok(None);
        };
        let stored: StoredRecord =
            bincode::deserialize(val.as_ref()).map_err(AnalyzerError::Serialization)?;
        Ok(Some(stored))
    }
}

impl RecordStore for DocStore {
    fn get(&self, fingerprint: &str) -> Result<Option<StringRecord>> {
        Ok(self.get_stored(fingerprint)?.map(|s| s.record))
    }

    fn contains(&self, fingerprint: &str) -> Result<bool> {
        Ok(self
            .records
            .get(fingerprint.as_bytes())
            .map_err(store_err)?
            .is_some())
    }

    fn insert(&self, record: &StringRecord) -> Result<()> {
        // Replacing a record keeps its original position.
        let seq = match self.get_stored(&record.id)? {
            Some(existing) => existing.seq,
            None => self.next_seq.fetch_add(1, Ordering::SeqCst),
        };

        let stored = StoredRecord {
            seq,
            record: record.clone(),
        };
        let val = bincode::serialize(&stored).map_err(AnalyzerError::Serialization)?;

        let mut batch = self.db.batch();
        batch.insert(&self.records, record.id.as_bytes(), val);
        batch.insert(&self.order, Self::encode_seq(seq), record.id.as_bytes());
        batch.commit().map_err(store_err)?;
        Ok(())
    }

    fn remove(&self, fingerprint: &str) -> Result<bool> {
        let Some(stored) = self.get_stored(fingerprint)? else {
            return Ok(false);
        };

        let mut batch = self.db.batch();
        batch.remove(&self.order, Self::encode_seq(stored.seq));
        batch.remove(&self.records, fingerprint.as_bytes());
        batch.commit().map_err(store_err)?;
        Ok(true)
    }

    fn load_all(&self) -> Result<Vec<StringRecord>> {
        let mut out = Vec::new();
        for kv in self.order.iter() {
            let key = kv.key().map_err(store_err)?;
            let key_bytes = key.as_ref().to_vec();
            let Some(fingerprint) = self.order.get(&key_bytes).map_err(store_err)? else {
                continue;
            };
            let fingerprint = String::from_utf8_lossy(fingerprint.as_ref()).into_owned();
            match self.get_stored(&fingerprint)? {
                Some(stored) => out.push(stored.record),
                None => warn!(%fingerprint, "order entry without record, skipping"),
            }
        }
        Ok(out)
    }

    fn len(&self) -> Result<usize> {
        let mut count = 0;
        for kv in self.records.iter() {
            kv.key().map_err(store_err)?;
            count += 1;
        }
        Ok(count)
    }
}
