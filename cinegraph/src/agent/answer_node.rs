//! GenerateAnswer node: final synthesis from context and tool output.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;

use super::prompts;
use super::state::AgentState;

/// Stores the model's raw response as `final_answer`. No post-processing.
pub struct GenerateAnswerNode {
    llm: Arc<dyn LlmClient>,
}

impl GenerateAnswerNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

/// `tool: output` per call, one per line, or the fixed placeholder.
fn render_tool_results(state: &AgentState) -> String {
    if state.tool_calls.is_empty() {
        return prompts::NO_TOOLS_USED.to_string();
    }
    state
        .tool_calls
        .iter()
        .map(|c| format!("{}: {}", c.tool, c.output))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Node<AgentState> for GenerateAnswerNode {
    fn id(&self) -> &str {
        "generate_answer"
    }

    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let context = state
            .graph_context
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(prompts::NO_CONTEXT);
        let prompt = prompts::generate_answer(&state.query, context, &render_tool_results(&state));
        let answer = self.llm.complete(&prompt).await?;
        state.final_answer = Some(answer);
        Ok((state, Next::End))
    }
}
