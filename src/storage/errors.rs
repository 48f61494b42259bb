use thiserror::Error;

/// Errors that can arise while reading or writing a persistence namespace.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, file locking, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a namespace cannot be mapped onto the backend's key space.
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),

    /// The backend refused the operation (poisoned lock, injected failure, quota).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
