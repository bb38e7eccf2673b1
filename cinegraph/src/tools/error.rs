//! Tool execution errors. They never leave [`Tool::run`](super::Tool::run).

use thiserror::Error;

use super::calculator::CalcError;
use crate::embedding::EmbeddingError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ToolExecutionError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Embedding(#[from] EmbeddingError),

    /// HTTP request failed or the response body was not the expected JSON.
    #[error("{0}")]
    Http(String),

    #[error("{0}")]
    Calculation(#[from] CalcError),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for ToolExecutionError {
    fn from(e: reqwest::Error) -> Self {
        ToolExecutionError::Http(e.to_string())
    }
}
