//! Errors that end a query.
//!
//! Returned by graph nodes and by [`MovieAgent::run`](crate::agent::MovieAgent::run).
//! Retrieval and language-model failures abort the whole query; tool failures never
//! reach this type (they are rendered as tool output, see [`crate::tools::Tool::run`]).

use thiserror::Error;

use crate::retrieval::RetrievalError;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Hybrid retrieval failed (store unreachable, malformed response, embedding failure).
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// The language model call failed or returned nothing usable.
    #[error("language model failed: {0}")]
    LanguageModel(String),

    /// Execution failed with a message (e.g. empty graph, workflow ended without an answer).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
