//! Error types for movie records.

use thiserror::Error;

/// Errors raised while preparing or checking movie records.
#[derive(Error, Debug)]
pub enum MovieError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No uid assigned for blank node '{0}'")]
    MissingUid(String),

    #[error("Query returned no movie for uid {0}")]
    NotFound(String),

    #[error("Read-back mismatch on '{field}': wrote {written:?}, read {read:?}")]
    Mismatch {
        field: &'static str,
        written: String,
        read: String,
    },
}

/// Result type for movie operations.
pub type MovieResult<T> = Result<T, MovieError>;
