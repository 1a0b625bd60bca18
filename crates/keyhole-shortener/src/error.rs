use keyhole_core::StorageError;
use thiserror::Error;

/// Result type for shortener operations.
pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Every length class produced an identifier that was already taken.
    #[error("identifier space exhausted after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
