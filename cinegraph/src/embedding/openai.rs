//! [`Embedder`] over an OpenAI-compatible `/embeddings` endpoint.
//!
//! The movie index was built with `all-MiniLM-L6-v2` (384 dimensions), usually served
//! locally (e.g. infinity on `:7997`); hosted OpenAI models work when the index is
//! rebuilt with them.

use async_openai::config::OpenAIConfig;
use async_openai::types::embeddings::{CreateEmbeddingRequest, EmbeddingInput};
use async_openai::Client;
use async_trait::async_trait;

use super::{Embedder, EmbeddingError};

pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Dimension used when the model is not in the built-in table.
const FALLBACK_DIMENSION: usize = 384;

/// Output size of the models the index is commonly built with.
fn known_dimension(model: &str) -> Option<usize> {
    let name = model.rsplit('/').next().unwrap_or(model).to_ascii_lowercase();
    match name.as_str() {
        "all-minilm-l6-v2" | "all-minilm-l12-v2" | "all-minilm" => Some(384),
        "all-mpnet-base-v2" => Some(768),
        "text-embedding-3-small" | "text-embedding-ada-002" => Some(1536),
        "text-embedding-3-large" => Some(3072),
        _ => None,
    }
}

/// ```ignore
/// use async_openai::config::OpenAIConfig;
/// use cinegraph::embedding::{Embedder, OpenAIEmbedder, DEFAULT_EMBEDDING_MODEL};
///
/// let config = OpenAIConfig::new().with_api_base("http://localhost:7997");
/// let embedder = OpenAIEmbedder::with_config(config, DEFAULT_EMBEDDING_MODEL);
/// let vector = embedder.embed_one("Find movies similar to The Matrix").await?;
/// ```
pub struct OpenAIEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    dimension: usize,
}

impl OpenAIEmbedder {
    /// Uses `OPENAI_API_KEY` and the public OpenAI base URL.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::new(), model)
    }

    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        let model = model.into();
        let dimension = known_dimension(&model).unwrap_or_else(|| {
            tracing::warn!(model = %model, fallback = FALLBACK_DIMENSION, "unknown embedding model dimension");
            FALLBACK_DIMENSION
        });
        Self {
            client: Client::with_config(config),
            model,
            dimension,
        }
    }

    /// Sets the dimension for models outside the built-in table.
    pub fn with_dimensions(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let input = match texts {
            [one] => EmbeddingInput::String((*one).to_string()),
            _ => EmbeddingInput::StringArray(texts.iter().map(|t| t.to_string()).collect()),
        };
        let request = CreateEmbeddingRequest {
            model: self.model.clone(),
            input,
            ..Default::default()
        };

        tracing::debug!(model = %self.model, inputs = texts.len(), "embedding request");
        let mut data = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| EmbeddingError::Provider(format!("embeddings API error: {}", e)))?
            .data;
        if data.len() < texts.len() {
            return Err(EmbeddingError::Empty);
        }
        data.sort_by_key(|item| item.index);
        Ok(data.into_iter().map(|item| item.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
