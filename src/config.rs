use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Where string records are kept
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    /// Fjall database under the data directory
    Persistent,
    /// Process memory; lost on exit
    InMemory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "persistent" | "fjall" | "disk" => Ok(StorageBackend::Persistent),
            "memory" | "in-memory" | "in_memory" => Ok(StorageBackend::InMemory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Persistent => f.write_str("persistent"),
            StorageBackend::InMemory => f.write_str("memory"),
        }
    }
}

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("./data"),
            storage: StorageBackend::Persistent,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: String, port: u16, data_dir: PathBuf) -> Self {
        Self {
            host,
            port,
            data_dir,
            ..Default::default()
        }
    }

    /// Set the storage backend
    pub fn with_storage(mut self, storage: StorageBackend) -> Self {
        self.storage = storage;
        self
    }

    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directory of the record store
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("strings")
    }
}
