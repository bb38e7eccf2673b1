use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ToolExecutionError;

/// Name and description shown to the language model when it picks a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

/// A capability the agent can invoke with a single string input.
///
/// Implementors provide [`Tool::call`], which may fail, and [`Tool::render_error`], which
/// turns that failure into the text the model sees. Callers use [`Tool::run`], which
/// never fails: the model receives either the result or the rendered error.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use cinegraph::tools::{Tool, ToolExecutionError};
///
/// struct Shout;
///
/// #[async_trait]
/// impl Tool for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn description(&self) -> &str {
///         "Upper-cases its input."
///     }
///
///     async fn call(&self, input: &str) -> Result<String, ToolExecutionError> {
///         Ok(input.to_uppercase())
///     }
///
///     fn render_error(&self, err: &ToolExecutionError) -> String {
///         format!("Shout error: {}", err)
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() {
/// assert_eq!(Shout.run("hi").await, "HI");
/// # }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name; the agent matches it against the lower-cased model response, so it
    /// should be lower-case.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }

    /// Executes the tool. Output text is handed back to the model verbatim.
    async fn call(&self, input: &str) -> Result<String, ToolExecutionError>;

    /// Text shown to the model when [`Tool::call`] fails.
    fn render_error(&self, err: &ToolExecutionError) -> String;

    /// Infallible entry point used by the agent.
    async fn run(&self, input: &str) -> String {
        match self.call(input).await {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!(tool = %self.name(), error = %err, "tool call failed");
                self.render_error(&err)
            }
        }
    }
}
