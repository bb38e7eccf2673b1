//! Graph store error types.

use thiserror::Error;

/// Graph store failure. Every variant aborts retrieval; the structured-query tool
/// renders it into its output text instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable (connection refused, timeout, TLS).
    #[error("store transport error: {0}")]
    Transport(String),

    /// Store answered with a non-success HTTP status.
    #[error("store HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The database rejected the statement (syntax error, unknown procedure, ...).
    #[error("{code}: {message}")]
    Query { code: String, message: String },

    /// Response payload did not have the expected shape.
    #[error("malformed store response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}
