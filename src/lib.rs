pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod persistence;
pub mod query;
pub mod service;
pub mod testing;

pub use analyzer::{analyze, analyze_value, fingerprint};
pub use api::{create_router, AppState};
pub use config::{ServerConfig, StorageBackend};
pub use error::{AnalyzerError, Result, ValidationKind};
pub use metrics::StringMetrics;
pub use models::*;
pub use persistence::{DocStore, MemoryStore, RecordStore};
pub use query::{FilterExecutor, InterpretedQuery, PhraseParser, StructuredFilterParser};
pub use service::StringService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
