//! # cinegraph
//!
//! Movie question answering over a knowledge graph. A query flows through a small
//! **state-in, state-out** workflow: the model analyzes it, a hybrid retriever pulls
//! context from the graph (vector + full-text search, merged and expanded through
//! graph traversal), a keyword rule decides whether the model may call one tool, and
//! the model writes the final answer.
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`]: build and run the workflow.
//! - [`agent`]: [`MovieAgent`], [`AgentState`], [`should_use_tools`], [`build_movie_agent`].
//! - [`retrieval`]: [`HybridRetriever`], [`merge_results`], [`format_context`].
//! - [`store`]: [`GraphStore`] trait, [`Neo4jHttpClient`], [`MockGraphStore`].
//! - [`tools`]: [`Tool`], [`ToolRegistry`]; `graph_query`, `web_search`, `calculator`.
//! - [`llm`]: [`LlmClient`], [`ChatOpenAI`], [`MockLlm`].
//! - [`embedding`]: [`Embedder`], [`OpenAIEmbedder`], [`MockEmbedder`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use cinegraph::{build_movie_agent, MovieAgentConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MovieAgentConfig::load(None)?;
//! let agent = build_movie_agent(&config)?;
//! let result = agent.run("Find movies similar to The Matrix").await?;
//! println!("{}", result.answer);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod embedding;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod retrieval;
pub mod store;
pub mod tools;

#[cfg(test)]
mod test_support;

pub use agent::{
    build_movie_agent, parse_tool_selection, should_use_tools, AgentRunResult, AgentState,
    BuildAgentError, ConfigError, MovieAgent, MovieAgentConfig, Route, ToolCallRecord,
    ToolSelection, TOOL_KEYWORDS,
};
pub use embedding::{Embedder, EmbeddingError, MockEmbedder, OpenAIEmbedder};
pub use error::AgentError;
pub use graph::{CompilationError, CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use message::{Message, Role};
pub use retrieval::{format_context, merge_results, HybridRetriever, RetrievalError, RetrievalOutput};
pub use store::{
    EnrichedMovie, GraphStats, GraphStore, MockGraphStore, Neo4jConfig, Neo4jHttpClient,
    ResultItem, StoreError,
};
pub use tools::{
    default_registry, CalculatorTool, GraphQueryTool, Tool, ToolDescriptor, ToolExecutionError,
    ToolRegistry, WebSearchTool,
};

/// When running `cargo test -p cinegraph`, initializes tracing from `RUST_LOG` so unit
/// tests in `src/**` can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use ctor::ctor;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::Layer;

    #[ctor]
    fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_filter(filter),
            )
            .try_init();
    }
}
