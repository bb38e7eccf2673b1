//! Movie question-answering agent: the workflow over [`AgentState`].
//!
//! Stages, each a graph node: `analyze_query` (intent analysis, audit only),
//! `retrieve_context` (hybrid retrieval), `reason_with_tools` (taken only when
//! [`should_use_tools`] matches a keyword) and `generate_answer` (final synthesis).
//! [`MovieAgent::run`] invokes the compiled graph with a fresh state per query.

mod analyze_node;
mod answer_node;
mod build;
mod config;
pub mod prompts;
mod reason_node;
mod retrieve_node;
mod routing;
mod runner;
mod state;

pub use analyze_node::AnalyzeQueryNode;
pub use answer_node::GenerateAnswerNode;
pub use build::{build_movie_agent, BuildAgentError};
pub use config::{
    ConfigError, EmbeddingSettings, LlmSettings, MovieAgentConfig, APP_NAME,
    DEFAULT_EMBEDDING_BASE_URL, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_LLM_TEMPERATURE,
};
pub use reason_node::{parse_tool_selection, ReasonWithToolsNode, ToolSelection};
pub use retrieve_node::RetrieveContextNode;
pub use routing::{should_use_tools, Route, TOOL_KEYWORDS};
pub use runner::{MovieAgent, DEFAULT_TOP_K};
pub use state::{AgentRunResult, AgentState, ToolCallRecord};
