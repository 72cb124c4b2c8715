//! Storage error types.

use thiserror::Error;

/// Errors from key-value operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The namespace or key is malformed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend failed (e.g. a poisoned lock).
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
