//! Dgraph client error types.

use thiserror::Error;

/// Errors raised by the Dgraph client.
#[derive(Error, Debug)]
pub enum DgraphError {
    #[error("Invalid Dgraph endpoint '{addr}': {reason}")]
    InvalidEndpoint { addr: String, reason: String },

    #[error("Failed to connect to Dgraph at {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("Dgraph request failed: {0}")]
    Status(#[from] tonic::Status),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Movie error: {0}")]
    Movie(#[from] dgmovie_core::MovieError),

    #[error("Connection already closed")]
    Closed,

    #[error("Transaction has already been committed or discarded")]
    Finished,

    #[error("Read-only transaction cannot {0}")]
    ReadOnly(&'static str),

    #[error("Transaction aborted by Dgraph")]
    Aborted,

    #[error("Start timestamp mismatch: transaction has {expected}, response has {actual}")]
    StartTsMismatch { expected: u64, actual: u64 },
}

/// Result type for Dgraph operations.
pub type DgraphResult<T> = Result<T, DgraphError>;

impl DgraphError {
    /// Create an invalid endpoint error.
    pub fn invalid_endpoint(addr: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            addr: addr.into(),
            reason: reason.into(),
        }
    }
}
