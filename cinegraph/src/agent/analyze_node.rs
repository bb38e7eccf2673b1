//! AnalyzeQuery node: free-text intent analysis, recorded as reasoning.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;

use super::prompts;
use super::state::AgentState;

/// Appends `Analysis: <model text>` to `reasoning` and resets `iteration`. The analysis
/// is never parsed and does not influence routing.
pub struct AnalyzeQueryNode {
    llm: Arc<dyn LlmClient>,
}

impl AnalyzeQueryNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<AgentState> for AnalyzeQueryNode {
    fn id(&self) -> &str {
        "analyze_query"
    }

    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let analysis = self.llm.complete(&prompts::analyze_query(&state.query)).await?;
        tracing::debug!(len = analysis.len(), "query analyzed");
        state.reasoning.push(format!("Analysis: {}", analysis));
        state.iteration = 0;
        Ok((state, Next::Continue))
    }
}
