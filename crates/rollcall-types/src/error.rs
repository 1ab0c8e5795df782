use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid username {value:?}: {reason}")]
    InvalidUsername { value: String, reason: String },

    #[error("invalid name {value:?}: {reason}")]
    InvalidName { value: String, reason: String },

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unknown sort key {0:?}: expected \"username\" or \"name\"")]
    InvalidSortKey(String),

    #[error("query parameter {param} must be a non-negative integer, got {value:?}")]
    InvalidInteger { param: &'static str, value: String },
}
