use thiserror::Error;

/// Result type for store and repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Uniqueness violation on an indexed field. Retryable when the caller
    /// can pick a different key, as with a freshly generated identifier.
    #[error("unique key already exists: {0}")]
    Conflict(String),
    #[error("no record matches {0}")]
    NotFound(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    /// Multiple records share a supposedly-unique key. Never recovered from:
    /// callers must treat this as fatal rather than pick a record.
    #[error("unique index corrupted: multiple records match {0}")]
    CorruptedIndex(String),
}
