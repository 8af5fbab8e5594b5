use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::analyzer::{analyze, analyze_value, canonicalize, fingerprint};
use crate::error::{AnalyzerError, Result};
use crate::metrics::{StringMetrics, QUERY_LOOKUP, QUERY_NATURAL_LANGUAGE, QUERY_STRUCTURED};
use crate::models::{Filter, StringProperties, StringRecord};
use crate::persistence::RecordStore;
use crate::query::{FilterExecutor, InterpretedQuery, PhraseParser, StructuredFilterParser};

/// Result of a filtered listing: the records and the filter that selected them
#[derive(Debug, Clone)]
pub struct FilteredStrings {
    pub records: Vec<StringRecord>,
    pub filter: Filter,
}

/// Result of a natural-language query
#[derive(Debug, Clone)]
pub struct InterpretedStrings {
    pub records: Vec<StringRecord>,
    pub interpreted: InterpretedQuery,
}

/// String record operations over an injected store.
///
/// Create and delete take an internal lock so the existence check and the
/// write happen as one step within this process.
pub struct StringService {
    store: Arc<dyn RecordStore>,
    metrics: Arc<StringMetrics>,
    write_lock: Mutex<()>,
}

impl StringService {
    pub fn new(store: Arc<dyn RecordStore>, metrics: Arc<StringMetrics>) -> Result<Self> {
        metrics.set_total_strings(store.len()?);
        Ok(Self {
            store,
            metrics,
            write_lock: Mutex::new(()),
        })
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<StringMetrics> {
        &self.metrics
    }

    /// Analyze and store a new string. Fails with `Conflict` if its
    /// fingerprint is already present.
    pub fn create(&self, value: &str) -> Result<StringRecord> {
        self.insert_new(canonicalize(value), analyze(value))
    }

    /// Like [`create`](Self::create) for a raw JSON value, which must be a string.
    pub fn create_from_json(&self, value: &serde_json::Value) -> Result<StringRecord> {
        let properties = analyze_value(value)?;
        let raw = value.as_str().unwrap_or_default();
        self.insert_new(canonicalize(raw), properties)
    }

    fn insert_new(&self, canonical: &str, properties: StringProperties) -> Result<StringRecord> {
        let _guard = self.write_lock.lock();

        if self.store.contains(&properties.sha256_hash)? {
            self.metrics.record_duplicate();
            return Err(AnalyzerError::Conflict(properties.sha256_hash));
        }

        let record = StringRecord::new(canonical, properties);
        self.store.insert(&record)?;
        self.metrics.record_create();
        info!(id = %record.id, length = record.length(), "string created");

        Ok(record)
    }

    /// Look up the record for `value` by recomputing its fingerprint.
    pub fn get(&self, value: &str) -> Result<StringRecord> {
        let start = Instant::now();
        let id = fingerprint(value);
        let result = self
            .store
            .get(&id)
            .and_then(|found| found.ok_or_else(|| AnalyzerError::NotFound(id.clone())));
        self.metrics
            .record_query(QUERY_LOOKUP, start.elapsed().as_secs_f64());
        if result.is_err() {
            self.metrics.record_query_error();
        }
        result
    }

    /// All records matching `filter`, in creation order.
    pub fn list(&self, filter: &Filter) -> Result<Vec<StringRecord>> {
        let records = self.store.load_all()?;
        Ok(FilterExecutor::apply(&records, filter))
    }

    /// Parse structured query parameters and list the matching records.
    pub fn list_with_params(&self, params: &HashMap<String, String>) -> Result<FilteredStrings> {
        let start = Instant::now();
        let filter = StructuredFilterParser::parse(params).inspect_err(|_| {
            self.metrics.record_query_error();
        })?;

        let records = self.list(&filter)?;
        debug!(?filter, hits = records.len(), "structured query");
        self.metrics
            .record_query(QUERY_STRUCTURED, start.elapsed().as_secs_f64());

        Ok(FilteredStrings { records, filter })
    }

    /// Translate a free-text query and list the matching records.
    pub fn natural_language(&self, query: &str) -> Result<InterpretedStrings> {
        let start = Instant::now();
        let interpreted = PhraseParser::parse(query).inspect_err(|_| {
            self.metrics.record_query_error();
        })?;

        let records = self.list(&interpreted.parsed_filters)?;
        debug!(
            query,
            filter = ?interpreted.parsed_filters,
            hits = records.len(),
            "natural language query"
        );
        self.metrics
            .record_query(QUERY_NATURAL_LANGUAGE, start.elapsed().as_secs_f64());

        Ok(InterpretedStrings {
            records,
            interpreted,
        })
    }

    /// Delete the record for `value`. Fails with `NotFound` if absent.
    pub fn delete(&self, value: &str) -> Result<()> {
        let id = fingerprint(value);
        let _guard = self.write_lock.lock();

        if !self.store.remove(&id)? {
            return Err(AnalyzerError::NotFound(id));
        }
        self.metrics.record_delete();
        info!(%id, "string deleted");
        Ok(())
    }

    pub fn total_strings(&self) -> Result<usize> {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn service() -> StringService {
        StringService::new(Arc::new(MemoryStore::new()), Arc::new(StringMetrics::new().unwrap()))
            .unwrap()
    }

    #[test]
    fn test_create_stores_trimmed_value() {
        let svc = service();
        let record = svc.create("  hello world  ").unwrap();
        assert_eq!(record.value, "hello world");
        assert_eq!(record.id, fingerprint("hello world"));
        assert_eq!(record.properties.sha256_hash, record.id);
        assert_eq!(svc.total_strings().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let svc = service();
        svc.create("level").unwrap();
        let err = svc.create(" level ").unwrap_err();
        assert!(matches!(err, AnalyzerError::Conflict(_)));
        assert_eq!(svc.total_strings().unwrap(), 1);
        assert_eq!(svc.metrics().duplicates_rejected.get(), 1.0);
    }

    #[test]
    fn test_create_from_json_requires_string() {
        let svc = service();
        assert!(svc.create_from_json(&serde_json::json!("abc")).is_ok());
        let err = svc.create_from_json(&serde_json::json!(12)).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidInput(_)));
        assert_eq!(svc.total_strings().unwrap(), 1);
    }

    #[test]
    fn test_get_roundtrip() {
        let svc = service();
        let created = svc.create("Racecar").unwrap();
        let fetched = svc.get("Racecar").unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.properties.sha256_hash, analyze("Racecar").sha256_hash);

        assert!(matches!(svc.get("racecar"), Err(AnalyzerError::NotFound(_))));
    }

    #[test]
    fn test_lookup_metrics_count_misses() {
        let svc = service();
        svc.create("present").unwrap();
        svc.get("present").unwrap();
        assert!(svc.get("absent").is_err());

        let lookups = svc
            .metrics()
            .queries_total
            .with_label_values(&[QUERY_LOOKUP])
            .get();
        assert_eq!(lookups, 2.0);
        assert_eq!(svc.metrics().query_errors.get(), 1.0);
    }

    #[test]
    fn test_delete() {
        let svc = service();
        svc.create("gone soon").unwrap();
        svc.delete("gone soon").unwrap();
        assert!(matches!(svc.delete("gone soon"), Err(AnalyzerError::NotFound(_))));
        assert!(matches!(svc.get("gone soon"), Err(AnalyzerError::NotFound(_))));
        assert_eq!(svc.metrics().total_strings.get(), 0.0);
    }

    #[test]
    fn test_queries_share_filter_semantics() {
        let svc = service();
        for v in ["noon", "hello world", "kayak", "a longer sentence here"] {
            svc.create(v).unwrap();
        }

        let structured = svc
            .list_with_params(&HashMap::from([
                ("is_palindrome".to_string(), "true".to_string()),
                ("word_count".to_string(), "1".to_string()),
            ]))
            .unwrap();
        let phrase = svc.natural_language("single word palindromic strings").unwrap();

        assert_eq!(structured.filter, phrase.interpreted.parsed_filters);
        assert_eq!(structured.records, phrase.records);
        let values: Vec<&str> = phrase.records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["noon", "kayak"]);
    }

    #[test]
    fn test_query_errors_are_typed() {
        let svc = service();
        let err = svc
            .list_with_params(&HashMap::from([("min_length".to_string(), "x".to_string())]))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_integer");

        let err = svc.natural_language("what is the weather").unwrap_err();
        assert!(matches!(err, AnalyzerError::UnparseableQuery(_)));
        assert_eq!(svc.metrics().query_errors.get(), 2.0);
    }
}
