//! Language-model client abstraction for the agent workflow.
//!
//! Every workflow stage that talks to the model (query analysis, tool selection,
//! answer synthesis) goes through [`LlmClient::complete`]: one prompt in, raw text out.
//! Implementations: [`MockLlm`] (scripted responses) and [`ChatOpenAI`]
//! (OpenAI-compatible chat completions, e.g. Groq).

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::Message;

/// Token counts as reported by the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from an LLM completion.
#[derive(Clone, Debug)]
pub struct LlmResponse {
    /// Assistant message content (plain text, unmodified).
    pub content: String,
    /// Token usage for this call, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

/// LLM client: given messages, returns assistant text.
///
/// Single-turn, no streaming. Errors are `AgentError::LanguageModel` and are not
/// retried; callers let them abort the query.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read messages, return assistant content.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;

    /// Sends `prompt` as a single user message and returns the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        let response = self.invoke(&[Message::user(prompt)]).await?;
        Ok(response.content)
    }
}
