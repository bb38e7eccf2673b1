//! Mock LLM for tests and examples.
//!
//! Returns scripted responses in order (the last one repeats once the script is
//! exhausted) and records every prompt it was given, so tests can assert on both the
//! workflow's control flow and the prompts it built.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::Message;

/// Mock LLM: scripted assistant text, prompt recording, optional failure.
///
/// **Interaction**: Implements `LlmClient`; used by the agent workflow tests.
pub struct MockLlm {
    script: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    prompts: Mutex<Vec<String>>,
    /// When set, every call after `fail_after` successful ones returns this error message.
    failure: Option<(usize, String)>,
}

impl MockLlm {
    /// Creates a mock that returns `responses` in order, then repeats the last one.
    pub fn scripted<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let script: VecDeque<String> = responses.into_iter().map(Into::into).collect();
        let last = script.back().cloned().unwrap_or_default();
        Self {
            script: Mutex::new(script),
            last: Mutex::new(last),
            prompts: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Creates a mock that always returns `content`.
    pub fn with_fixed_response(content: impl Into<String>) -> Self {
        Self::scripted([content.into()])
    }

    /// After `successes` successful calls, every call fails with `AgentError::LanguageModel(message)`.
    pub fn failing_after(mut self, successes: usize, message: impl Into<String>) -> Self {
        self.failure = Some((successes, message.into()));
        self
    }

    /// Prompts received so far (text of all messages per call, joined by newlines).
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Number of calls received so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let prompt = messages
            .iter()
            .map(Message::text)
            .collect::<Vec<_>>()
            .join("\n");
        let calls_before = {
            let mut prompts = self
                .prompts
                .lock()
                .map_err(|_| AgentError::LanguageModel("mock llm poisoned".into()))?;
            prompts.push(prompt);
            prompts.len() - 1
        };
        if let Some((successes, message)) = &self.failure {
            if calls_before >= *successes {
                return Err(AgentError::LanguageModel(message.clone()));
            }
        }

        let next = self
            .script
            .lock()
            .map_err(|_| AgentError::LanguageModel("mock llm poisoned".into()))?
            .pop_front();
        let content = match next {
            Some(c) => {
                if let Ok(mut last) = self.last.lock() {
                    *last = c.clone();
                }
                c
            }
            None => self.last.lock().map(|l| l.clone()).unwrap_or_default(),
        };
        Ok(LlmResponse {
            content,
            usage: None,
        })
    }
}
