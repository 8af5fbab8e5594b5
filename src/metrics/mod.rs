use prometheus::{Counter, CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry};
use std::sync::Arc;

/// Query kinds used as metric labels
pub const QUERY_STRUCTURED: &str = "structured";
pub const QUERY_NATURAL_LANGUAGE: &str = "natural_language";
pub const QUERY_LOOKUP: &str = "lookup";

/// Prometheus metrics for the string store
#[derive(Clone)]
pub struct StringMetrics {
    // Counters
    pub strings_created: Counter,
    pub strings_deleted: Counter,
    pub duplicates_rejected: Counter,
    pub queries_total: CounterVec,
    pub query_errors: Counter,

    // Gauges
    pub total_strings: Gauge,

    // Histograms
    pub query_latency: HistogramVec,

    registry: Arc<Registry>,
}

impl StringMetrics {
    /// Create a new StringMetrics instance on a private registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let strings_created = Counter::with_opts(Opts::new(
            "string_analyzer_strings_created_total",
            "Total number of strings created",
        ))?;
        registry.register(Box::new(strings_created.clone()))?;

        let strings_deleted = Counter::with_opts(Opts::new(
            "string_analyzer_strings_deleted_total",
            "Total number of strings deleted",
        ))?;
        registry.register(Box::new(strings_deleted.clone()))?;

        let duplicates_rejected = Counter::with_opts(Opts::new(
            "string_analyzer_duplicates_rejected_total",
            "Total number of create requests rejected as duplicates",
        ))?;
        registry.register(Box::new(duplicates_rejected.clone()))?;

        let queries_total = CounterVec::new(
            Opts::new("string_analyzer_queries_total", "Total number of queries by type"),
            &["type"],
        )?;
        registry.register(Box::new(queries_total.clone()))?;

        let query_errors = Counter::with_opts(Opts::new(
            "string_analyzer_query_errors_total",
            "Total number of rejected or failed queries",
        ))?;
        registry.register(Box::new(query_errors.clone()))?;

        let total_strings = Gauge::with_opts(Opts::new(
            "string_analyzer_total_strings",
            "Current number of stored strings",
        ))?;
        registry.register(Box::new(total_strings.clone()))?;

        let query_latency = HistogramVec::new(
            HistogramOpts::new("string_analyzer_query_latency_seconds", "Query latency")
                .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["type"],
        )?;
        registry.register(Box::new(query_latency.clone()))?;

        Ok(Self {
            strings_created,
            strings_deleted,
            duplicates_rejected,
            queries_total,
            query_errors,
            total_strings,
            query_latency,
            registry: Arc::new(registry),
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn record_create(&self) {
        self.strings_created.inc();
        self.total_strings.inc();
    }

    pub fn record_duplicate(&self) {
        self.duplicates_rejected.inc();
    }

    pub fn record_delete(&self) {
        self.strings_deleted.inc();
        self.total_strings.dec();
    }

    /// Record a completed query
    pub fn record_query(&self, query_type: &str, duration_secs: f64) {
        self.queries_total.with_label_values(&[query_type]).inc();
        self.query_latency
            .with_label_values(&[query_type])
            .observe(duration_secs);
    }

    pub fn record_query_error(&self) {
        self.query_errors.inc();
    }

    pub fn set_total_strings(&self, count: usize) {
        self.total_strings.set(count as f64);
    }
}

impl Default for StringMetrics {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_gauge() {
        let metrics = StringMetrics::new().unwrap();
        metrics.set_total_strings(2);
        metrics.record_create();
        metrics.record_delete();
        metrics.record_delete();

        assert_eq!(metrics.strings_created.get(), 1.0);
        assert_eq!(metrics.strings_deleted.get(), 2.0);
        assert_eq!(metrics.total_strings.get(), 1.0);
    }

    #[test]
    fn test_query_metrics_registered() {
        let metrics = StringMetrics::new().unwrap();
        metrics.record_query(QUERY_STRUCTURED, 0.002);
        metrics.record_query(QUERY_STRUCTURED, 0.001);
        metrics.record_query_error();

        assert_eq!(
            metrics
                .queries_total
                .with_label_values(&[QUERY_STRUCTURED])
                .get(),
            2.0
        );
        let names: Vec<String> = metrics
            .registry()
            .gather()
            .iter()
            .map(|f| f.get_name().to_string())
            .collect();
        assert!(names.contains(&"string_analyzer_query_latency_seconds".to_string()));
        assert!(names.contains(&"string_analyzer_query_errors_total".to_string()));
    }
}
