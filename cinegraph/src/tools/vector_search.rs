use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{Tool, ToolExecutionError};
use crate::embedding::Embedder;
use crate::store::GraphStore;

pub const TOOL_VECTOR_SEARCH: &str = "vector_search_movies";

const DEFAULT_TOP_K: usize = 5;

const DESCRIPTION: &str = "Perform a semantic search for movies based on a natural language query.
Use this when the user is looking for movies with specific themes, plots, or \"vibe\".";

/// Semantic search over the movie vector index.
pub struct VectorSearchTool {
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl VectorSearchTool {
    pub fn new(store: Arc<dyn GraphStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            store,
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }
}

#[async_trait]
impl Tool for VectorSearchTool {
    fn name(&self) -> &str {
        TOOL_VECTOR_SEARCH
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn call(&self, input: &str) -> Result<String, ToolExecutionError> {
        let embedding = self.embedder.embed_one(input.trim()).await?;
        let hits = self.store.vector_search(&embedding, self.top_k).await?;
        let rows: Vec<_> = hits
            .iter()
            .map(|h| json!({"title": h.title, "overview": h.overview, "score": h.score}))
            .collect();
        Ok(format!("Semantic search results: {}", json!(rows)))
    }

    fn render_error(&self, err: &ToolExecutionError) -> String {
        format!("Error performing vector search: {}", err)
    }
}
