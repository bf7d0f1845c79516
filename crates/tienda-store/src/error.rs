//! Store error types.

use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the backing store.
    #[error("Failed to open store: {0}")]
    OpenError(String),

    /// Failed to serialize or parse a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to read or write the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to perform store operation.
    #[error("Store operation failed: {0}")]
    StoreError(String),
}
