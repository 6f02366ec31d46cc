//! Error types for storage and the form state store.
//!
//! Validation failures are not errors in this sense; they are reported as
//! data (see `schema::ValidationError`).

use thiserror::Error;

/// Failure of the key-value storage backing persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage quota exceeded for key {key}: {needed} bytes > {limit} bytes")]
    QuotaExceeded { key: String, needed: usize, limit: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Rejected store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown topic standard: {0}")]
    UnknownTopic(String),

    #[error("invalid field path: {0:?}")]
    InvalidPath(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
