//! Error types for the tabula library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabula operations.
#[derive(Debug, Error)]
pub enum TabulaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to ingest.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid user-supplied input (rename target, identifier).
    #[error("Invalid input: {0}")]
    Input(String),

    /// DDL or DML failure against the store, with context.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error from the SQLite driver.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Model service unreachable, credential missing, or bad payload.
    #[error("Translation error: {0}")]
    Translation(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tabula operations.
pub type Result<T> = std::result::Result<T, TabulaError>;
