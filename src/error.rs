use std::fmt;

use thiserror::Error;

/// Reason a structured filter parameter was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    InvalidBoolean,
    InvalidInteger,
    InvalidString,
}

impl ValidationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::InvalidBoolean => "invalid_boolean",
            ValidationKind::InvalidInteger => "invalid_integer",
            ValidationKind::InvalidString => "invalid_string",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for string analyzer operations
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter ({kind}): {message}")]
    Validation {
        kind: ValidationKind,
        message: String,
    },

    #[error("Unable to parse natural language query: {0}")]
    UnparseableQuery(String),

    #[error("String not found: {0}")]
    NotFound(String),

    #[error("String already exists: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for string analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    pub fn validation(kind: ValidationKind, message: impl Into<String>) -> Self {
        AnalyzerError::Validation {
            kind,
            message: message.into(),
        }
    }

    /// Stable machine-readable kind, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzerError::InvalidInput(_) => "invalid_input",
            AnalyzerError::Validation { kind, .. } => kind.as_str(),
            AnalyzerError::UnparseableQuery(_) => "unparseable_query",
            AnalyzerError::NotFound(_) => "not_found",
            AnalyzerError::Conflict(_) => "conflict",
            AnalyzerError::Store(_) => "store_error",
            AnalyzerError::Serialization(_) => "serialization_error",
            AnalyzerError::Io(_) => "io_error",
        }
    }

    /// True for failures of the persistence layer rather than of the request
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            AnalyzerError::Store(_) | AnalyzerError::Serialization(_) | AnalyzerError::Io(_)
        )
    }
}
