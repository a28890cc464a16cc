//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Diagnostic category used to prefix user-visible error lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Connection,
    Model,
    Record,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Connection => write!(f, "connection"),
            ErrorCategory::Model => write!(f, "model"),
            ErrorCategory::Record => write!(f, "record"),
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Embedding model error: {0}")]
    Model(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("No products found in {table}")]
    EmptyCatalog { table: String },
}

impl DomainError {
    pub fn missing_config<T: AsRef<str>>(key: T) -> Self {
        Self::Configuration(format!("{} is not set", key.as_ref()))
    }

    pub fn invalid_config<T: AsRef<str>>(key: T, value: &str) -> Self {
        Self::Configuration(format!("{} has an invalid value: {:?}", key.as_ref(), value))
    }

    /// Category shown as the `[prefix]` of diagnostics
    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::Configuration(_) => ErrorCategory::Config,
            DomainError::Connection(_) | DomainError::EmptyCatalog { .. } => {
                ErrorCategory::Connection
            }
            DomainError::Model(_) => ErrorCategory::Model,
            DomainError::Repository(_) | DomainError::InvalidRecord(_) => ErrorCategory::Record,
        }
    }
}
