//! Agent workflow state and the run result handed to callers.

use serde::{Deserialize, Serialize};

use crate::store::ResultItem;

/// One tool invocation, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool: String,
    pub input: String,
    pub output: String,
}

/// State threaded through the workflow. Created fresh per query and never shared.
///
/// `reasoning` and `tool_calls` are append-only. `final_answer` is set only by the
/// answer stage, so it is `Some` exactly when the run completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub query: String,
    pub reasoning: Vec<String>,
    pub tool_calls: Vec<ToolCallRecord>,
    pub graph_context: Option<String>,
    pub vector_results: Option<Vec<ResultItem>>,
    pub final_answer: Option<String>,
    pub iteration: u32,
}

impl AgentState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// Public result of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRunResult {
    pub answer: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub reasoning: Vec<String>,
    /// Number of vector-search results retrieval produced.
    pub context_used: usize,
}
