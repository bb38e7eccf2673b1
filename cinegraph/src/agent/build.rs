//! Wires the production collaborators into a [`MovieAgent`].

use std::sync::Arc;

use async_openai::config::OpenAIConfig;

use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::graph::CompilationError;
use crate::llm::{ChatOpenAI, LlmClient};
use crate::retrieval::HybridRetriever;
use crate::store::{GraphStore, Neo4jHttpClient, StoreError};
use crate::tools::{default_registry, ToolExecutionError, WebSearchTool};

use super::config::MovieAgentConfig;
use super::runner::MovieAgent;

#[derive(Debug, thiserror::Error)]
pub enum BuildAgentError {
    #[error("graph store: {0}")]
    Store(#[from] StoreError),

    #[error("tool setup: {0}")]
    Tool(#[from] ToolExecutionError),

    #[error("workflow compilation: {0}")]
    Compilation(#[from] CompilationError),
}

/// `ChatOpenAI` + `OpenAIEmbedder` + `Neo4jHttpClient` + the default tools.
pub fn build_movie_agent(config: &MovieAgentConfig) -> Result<MovieAgent, BuildAgentError> {
    let llm: Arc<dyn LlmClient> = Arc::new(
        ChatOpenAI::with_config(
            OpenAIConfig::new()
                .with_api_key(&config.llm.api_key)
                .with_api_base(&config.llm.base_url),
            &config.llm.model,
        )
        .with_temperature(config.llm.temperature),
    );

    let mut embedding_config = OpenAIConfig::new().with_api_base(&config.embedding.base_url);
    if let Some(key) = &config.embedding.api_key {
        embedding_config = embedding_config.with_api_key(key);
    }
    let mut embedder = OpenAIEmbedder::with_config(embedding_config, &config.embedding.model);
    if let Some(dimension) = config.embedding.dimension {
        embedder = embedder.with_dimensions(dimension);
    }
    let embedder: Arc<dyn Embedder> = Arc::new(embedder);

    let store: Arc<dyn GraphStore> = Arc::new(Neo4jHttpClient::new(config.neo4j.clone())?);
    let tools = default_registry(
        store.clone(),
        WebSearchTool::with_endpoint(&config.web_search_url)?,
    );

    tracing::info!(
        neo4j = %config.neo4j.uri,
        model = %config.llm.model,
        embedding_model = %config.embedding.model,
        "movie agent built"
    );
    Ok(MovieAgent::with_retrieval_top_k(
        llm,
        HybridRetriever::new(store, embedder),
        tools,
        config.top_k,
    )?)
}
