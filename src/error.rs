//! Error types for outline state persistence

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by expansion-state stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the state file.
    #[error("failed to read state file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    
    /// Failed to write the state file.
    #[error("failed to write state file {path}: {source}")]
    WriteFile {
        /// Path to the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    
    /// Failed to create the state directory.
    #[error("failed to create state directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    
    /// The state file is not valid JSON.
    #[error("failed to parse state file {path}: {source}")]
    ParseJson {
        /// Path to the malformed file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    
    /// The state could not be encoded.
    #[error("failed to encode state: {0}")]
    SerializeJson(#[source] serde_json::Error),
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
