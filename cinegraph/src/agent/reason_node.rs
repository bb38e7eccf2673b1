//! ReasonWithTools node: the model picks at most one tool, which then runs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::tools::ToolRegistry;

use super::prompts;
use super::state::{AgentState, ToolCallRecord};

/// What the model's tool-selection response asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSelection {
    /// The response contains the `NO_TOOL_NEEDED` marker.
    NoToolNeeded,
    /// A registered tool name occurs in the response; `input` is the text after the
    /// first colon, trimmed (empty when there is no colon).
    Invoke { tool: String, input: String },
    /// No registered tool name occurs in the response.
    Unmatched,
}

/// Reads a `TOOL_NAME: input` response. The marker is checked first; otherwise the
/// first registered tool whose name occurs in the lower-cased response wins.
pub fn parse_tool_selection(response: &str, registry: &ToolRegistry) -> ToolSelection {
    let response = response.trim();
    if response.contains(prompts::NO_TOOL_NEEDED) {
        return ToolSelection::NoToolNeeded;
    }
    match registry.find_in(response) {
        Some(tool) => ToolSelection::Invoke {
            tool: tool.name().to_string(),
            input: response
                .split_once(':')
                .map(|(_, rest)| rest.trim().to_string())
                .unwrap_or_default(),
        },
        None => ToolSelection::Unmatched,
    }
}

pub struct ReasonWithToolsNode {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
}

impl ReasonWithToolsNode {
    pub fn new(llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        Self { llm, tools }
    }
}

#[async_trait]
impl Node<AgentState> for ReasonWithToolsNode {
    fn id(&self) -> &str {
        "reason_with_tools"
    }

    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let prompt = prompts::select_tool(
            &self.tools.descriptors(),
            &state.query,
            state.graph_context.as_deref().unwrap_or(""),
        );
        let response = self.llm.complete(&prompt).await?;

        match parse_tool_selection(&response, &self.tools) {
            ToolSelection::Invoke { tool, input } => {
                if let Some(t) = self.tools.get(&tool) {
                    let output = t.run(&input).await;
                    tracing::debug!(tool = %tool, "tool invoked");
                    state.tool_calls.push(ToolCallRecord {
                        tool,
                        input,
                        output,
                    });
                }
            }
            ToolSelection::NoToolNeeded => tracing::debug!("model chose no tool"),
            ToolSelection::Unmatched => {
                tracing::debug!(response = %response, "no registered tool in response")
            }
        }
        Ok((state, Next::Continue))
    }
}
