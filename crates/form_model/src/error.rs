//! Error types for schema loading

use thiserror::Error;

/// Errors that can occur while loading a form schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// IO error reading a schema file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing schema JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
