//! Embedding provider: text → fixed-dimension vector.
//!
//! The hybrid retriever embeds the raw query once per retrieval and hands the vector
//! to the graph store's vector index. Implementations: [`OpenAIEmbedder`]
//! (OpenAI-compatible embeddings endpoint) and [`MockEmbedder`] (deterministic, tests).

mod mock;
mod openai;

pub use mock::MockEmbedder;
pub use openai::{OpenAIEmbedder, DEFAULT_EMBEDDING_MODEL};

use async_trait::async_trait;
use thiserror::Error;

/// Embedding failure.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Provider call failed (transport, auth, rate limit).
    #[error("embedding provider error: {0}")]
    Provider(String),

    /// Provider returned fewer vectors than inputs.
    #[error("no embedding returned")]
    Empty,

    /// Provider returned a vector of the wrong length.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Produces fixed-size float vectors from text.
///
/// Implementations must be deterministic for identical input and `Send + Sync`
/// for use from concurrent queries.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds each text into a vector of dimension [`Embedder::dimension`].
    /// Returns one vector per input text in the same order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Vector dimension returned by [`Embedder::embed`].
    fn dimension(&self) -> usize;

    /// Embeds one text and checks its length against [`Embedder::dimension`].
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let vector = self
            .embed(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::Empty)?;
        if vector.len() != self.dimension() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension(),
                actual: vector.len(),
            });
        }
        Ok(vector)
    }
}
