//! `ChatOpenAI`: chat completions against any OpenAI-compatible endpoint.
//!
//! The default deployment points it at Groq (`https://api.groq.com/openai/v1`) through
//! `OpenAIConfig::with_api_base`. Each call gets a fresh trace id so the request and
//! its completion can be matched in debug logs.

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestUserMessage, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage};
use crate::message::{Message, Role};

pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Uses `OPENAI_API_KEY` and the public OpenAI base URL.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::new(), model)
    }

    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, messages: &[Message]) -> Result<CreateChatCompletionRequest, AgentError> {
        let messages: Vec<ChatCompletionRequestMessage> = messages
            .iter()
            .map(|m| match m.role {
                Role::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(m.text()),
                ),
                Role::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(m.text()),
                ),
                Role::Assistant => ChatCompletionRequestMessage::Assistant(m.text().into()),
            })
            .collect();

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.as_str()).messages(messages);
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        args.build()
            .map_err(|e| AgentError::LanguageModel(format!("chat request build failed: {}", e)))
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let trace_id = uuid::Uuid::new_v4();
        let request = self.request(messages)?;
        debug!(%trace_id, model = %self.model, messages = messages.len(), "chat completion");
        if let Ok(body) = serde_json::to_string(&request) {
            trace!(%trace_id, %body, "chat request");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::LanguageModel(format!("chat API error: {}", e)))?;

        let usage = response.usage.as_ref().map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::LanguageModel("chat API returned no choices".into()))?
            .message
            .content
            .unwrap_or_default();
        let out = LlmResponse { content, usage };
        debug!(%trace_id, content_len = out.content.len(), usage = ?out.usage, "chat completion done");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groq(base: &str) -> ChatOpenAI {
        let config = OpenAIConfig::new()
            .with_api_key("test-key")
            .with_api_base(base);
        ChatOpenAI::with_config(config, "llama-3.3-70b-versatile")
    }

    #[test]
    fn request_carries_model_temperature_and_roles() {
        let llm = groq("https://api.groq.com/openai/v1").with_temperature(0.7);
        let request = llm
            .request(&[Message::system("be brief"), Message::user("Heat?")])
            .unwrap();
        let v = serde_json::to_value(&request).unwrap();
        assert_eq!(v["model"], "llama-3.3-70b-versatile");
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(v["messages"][1]["content"], "Heat?");
        assert!((v["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    /// **Scenario**: an unreachable endpoint surfaces as a model error.
    #[tokio::test]
    async fn unreachable_endpoint_is_language_model_error() {
        let result = groq("http://127.0.0.1:1").complete("Hello").await;
        assert!(matches!(result, Err(AgentError::LanguageModel(_))));
    }

    #[tokio::test]
    #[ignore = "Requires GROQ_API_KEY; run with: cargo test -p cinegraph real_endpoint -- --ignored"]
    async fn real_endpoint_answers() {
        let key = std::env::var("GROQ_API_KEY").unwrap_or_default();
        let config = OpenAIConfig::new()
            .with_api_key(key)
            .with_api_base("https://api.groq.com/openai/v1");
        let out = ChatOpenAI::with_config(config, "llama-3.3-70b-versatile")
            .complete("Say hi")
            .await
            .unwrap();
        assert!(!out.is_empty());
    }
}
