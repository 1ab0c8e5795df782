/// Errors from key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or rejected the command.
    #[error("backend error: {0}")]
    Backend(#[from] ::redis::RedisError),

    /// An in-process lock was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// A hash field holds bytes that are not valid UTF-8.
    #[error("corrupt value at {key}/{field}: not valid UTF-8")]
    CorruptValue { key: String, field: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
