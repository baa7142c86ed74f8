//! Error types for the Extractor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source document
///
/// All of these are fatal for the load; a record with an unparseable date is
/// not an error and is reported through `ExtractionResult::skipped` instead.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(String),

    /// The document is JSON but not a sequence of chunk objects
    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    /// The document exceeds the configured size limit
    #[error("Document too large: {0} bytes (max: {1})")]
    TooLarge(u64, u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e.to_string())
    }
}
