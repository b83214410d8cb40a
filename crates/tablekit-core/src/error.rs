//! Error types for tablekit

use thiserror::Error;

/// Error raised while loading settings or decoding filter definitions.
///
/// Filter evaluation itself never fails; these only surface from setup paths.
#[derive(Error, Debug)]
pub enum TableKitError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for tablekit operations
pub type Result<T> = std::result::Result<T, TableKitError>;
