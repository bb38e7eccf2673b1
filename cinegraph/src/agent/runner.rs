//! Movie agent runner: compiles the workflow once and runs it per query.
//!
//! Graph: START → analyze_query → retrieve_context → [should_use_tools]
//! → reason_with_tools | generate_answer; reason_with_tools → generate_answer → END.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::retrieval::HybridRetriever;
use crate::tools::ToolRegistry;

use super::analyze_node::AnalyzeQueryNode;
use super::answer_node::GenerateAnswerNode;
use super::reason_node::ReasonWithToolsNode;
use super::retrieve_node::RetrieveContextNode;
use super::routing::{should_use_tools, Route};
use super::state::{AgentRunResult, AgentState};

/// Results per index search in the retrieval stage.
pub const DEFAULT_TOP_K: usize = 5;

/// The question-answering agent. Safe to share across concurrent queries: each
/// [`MovieAgent::run`] works on its own [`AgentState`].
pub struct MovieAgent {
    compiled: CompiledStateGraph<AgentState>,
    tools: Arc<ToolRegistry>,
}

impl MovieAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        retriever: HybridRetriever,
        tools: ToolRegistry,
    ) -> Result<Self, CompilationError> {
        Self::with_retrieval_top_k(llm, retriever, tools, DEFAULT_TOP_K)
    }

    pub fn with_retrieval_top_k(
        llm: Arc<dyn LlmClient>,
        retriever: HybridRetriever,
        tools: ToolRegistry,
        top_k: usize,
    ) -> Result<Self, CompilationError> {
        let retriever = Arc::new(retriever);
        let tools = Arc::new(tools);

        let route_map: HashMap<String, String> = [
            (Route::UseTools.as_key().into(), "reason_with_tools".into()),
            (Route::SkipTools.as_key().into(), "generate_answer".into()),
        ]
        .into_iter()
        .collect();

        let mut graph = StateGraph::<AgentState>::new();
        graph
            .add_node("analyze_query", Arc::new(AnalyzeQueryNode::new(llm.clone())))
            .add_node(
                "retrieve_context",
                Arc::new(RetrieveContextNode::new(retriever, top_k)),
            )
            .add_node(
                "reason_with_tools",
                Arc::new(ReasonWithToolsNode::new(llm.clone(), tools.clone())),
            )
            .add_node("generate_answer", Arc::new(GenerateAnswerNode::new(llm)))
            .add_edge(START, "analyze_query")
            .add_edge("analyze_query", "retrieve_context")
            .add_conditional_edges(
                "retrieve_context",
                Arc::new(|state: &AgentState| should_use_tools(&state.query).as_key().to_string()),
                Some(route_map),
            )
            .add_edge("reason_with_tools", "generate_answer")
            .add_edge("generate_answer", END);

        Ok(Self {
            compiled: graph.compile()?,
            tools,
        })
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Runs the workflow for one query. Retrieval and model failures abort the run.
    pub async fn run(&self, query: &str) -> Result<AgentRunResult, AgentError> {
        tracing::info!(query = %query, "agent run start");
        let state = self.compiled.invoke(AgentState::new(query)).await?;

        let answer = state.final_answer.ok_or_else(|| {
            AgentError::ExecutionFailed("workflow ended without an answer".into())
        })?;
        let result = AgentRunResult {
            answer,
            context_used: state.vector_results.as_ref().map_or(0, Vec::len),
            tool_calls: state.tool_calls,
            reasoning: state.reasoning,
        };
        tracing::info!(
            tool_calls = result.tool_calls.len(),
            context_used = result.context_used,
            "agent run complete"
        );
        Ok(result)
    }
}
