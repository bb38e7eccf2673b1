//! Hybrid retriever: vector + full-text search, merge-dedup, graph expansion.
//!
//! One [`HybridRetriever::retrieve`] call embeds the query, runs both index searches,
//! merges them with [`merge_results`], and expands the first [`ENRICH_LIMIT`] merged
//! titles through the store's entity-context traversal. Any failing step aborts the
//! whole retrieval; partial results are never returned.

mod context;
mod merge;

pub use context::{format_context, BLOCK_SEPARATOR};
pub use merge::merge_results;

use std::sync::Arc;

use thiserror::Error;

use crate::embedding::{Embedder, EmbeddingError};
use crate::store::{EnrichedMovie, GraphStore, ResultItem, StoreError};

/// Merged titles expanded through graph traversal, regardless of `top_k`.
pub const ENRICH_LIMIT: usize = 3;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("top_k must be greater than 0")]
    InvalidTopK,
}

/// The three result sets of one retrieval.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalOutput {
    pub vector_results: Vec<ResultItem>,
    pub fulltext_results: Vec<ResultItem>,
    pub enriched_context: Vec<EnrichedMovie>,
}

impl RetrievalOutput {
    /// Context text for the language model, see [`format_context`].
    pub fn context_text(&self) -> String {
        format_context(&self.enriched_context)
    }
}

pub struct HybridRetriever {
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn Embedder>,
}

impl HybridRetriever {
    pub fn new(store: Arc<dyn GraphStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self { store, embedder }
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<RetrievalOutput, RetrievalError> {
        if top_k == 0 {
            return Err(RetrievalError::InvalidTopK);
        }

        let embedding = self.embedder.embed_one(query).await?;
        let vector_results = self.store.vector_search(&embedding, top_k).await?;
        let fulltext_results = self.store.fulltext_search(query, top_k).await?;

        let merged = merge_results(&vector_results, &fulltext_results);
        let mut enriched_context = Vec::with_capacity(ENRICH_LIMIT);
        for item in merged.iter().take(ENRICH_LIMIT) {
            match self.store.movie_context(&item.title).await? {
                Some(movie) => enriched_context.push(movie),
                None => tracing::debug!(title = %item.title, "no graph context for title"),
            }
        }

        tracing::debug!(
            vector = vector_results.len(),
            fulltext = fulltext_results.len(),
            merged = merged.len(),
            enriched = enriched_context.len(),
            "hybrid retrieval"
        );
        Ok(RetrievalOutput {
            vector_results,
            fulltext_results,
            enriched_context,
        })
    }
}
