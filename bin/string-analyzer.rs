use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use string_analyzer::{
    AppState, DocStore, MemoryStore, RecordStore, ServerConfig, StorageBackend, StringMetrics,
    StringService,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "string-analyzer")]
#[command(about = "String analysis and storage service", long_about = None)]
struct Args {
    /// Host address for the HTTP API
    #[arg(long, env = "STRING_ANALYZER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Data directory for the record store
    #[arg(long, env = "STRING_ANALYZER_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Storage backend (persistent, memory)
    #[arg(long, env = "STRING_ANALYZER_STORAGE", default_value = "persistent")]
    storage: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting String Analyzer v{}", string_analyzer::VERSION);

    let storage = args.storage.parse().unwrap_or_else(|e| {
        warn!("{}, using 'persistent'", e);
        StorageBackend::Persistent
    });

    let config = ServerConfig::new(args.host, args.port, args.data_dir).with_storage(storage);

    info!("Server configuration:");
    info!("  Bind address: {}", config.bind_addr());
    info!("  Storage: {}", config.storage);
    info!("  Data directory: {:?}", config.data_dir);

    // Open the record store; it lives until the server shuts down
    let store: Arc<dyn RecordStore> = match config.storage {
        StorageBackend::Persistent => Arc::new(DocStore::open(config.store_dir())?),
        StorageBackend::InMemory => Arc::new(MemoryStore::new()),
    };
    info!("Record store opened ({} strings)", store.len()?);

    let metrics = Arc::new(StringMetrics::new()?);
    let service = Arc::new(StringService::new(store, metrics)?);

    let app = string_analyzer::create_router(AppState { service });
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("HTTP API server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to install CTRL+C signal handler: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Received shutdown signal, gracefully shutting down");
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
