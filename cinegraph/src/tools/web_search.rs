use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolExecutionError};

/// Tool name for the external web lookup.
pub const TOOL_WEB_SEARCH: &str = "web_search";

/// DuckDuckGo Instant Answer API.
pub const DEFAULT_WEB_SEARCH_URL: &str = "https://api.duckduckgo.com/";

const TIMEOUT: Duration = Duration::from_secs(10);

const NO_RESULTS: &str = "No results found";

const DESCRIPTION: &str = "Search the web for current information not in the knowledge graph.
Use this for real-time data, external facts, or information beyond the movie database.";

/// One GET to an Instant-Answer style endpoint; returns its `AbstractText`.
pub struct WebSearchTool {
    client: reqwest::Client,
    endpoint: String,
}

impl WebSearchTool {
    pub fn new() -> Result<Self, ToolExecutionError> {
        Self::with_endpoint(DEFAULT_WEB_SEARCH_URL)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, ToolExecutionError> {
        let client = reqwest::Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        TOOL_WEB_SEARCH
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn call(&self, input: &str) -> Result<String, ToolExecutionError> {
        tracing::debug!(endpoint = %self.endpoint, "web search");
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", input), ("format", "json")])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ToolExecutionError::Http(format!("HTTP {}", status)));
        }
        let body: Value = resp.json().await?;
        let text = body
            .get("AbstractText")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_RESULTS);
        Ok(format!("Search results: {}", text))
    }

    fn render_error(&self, err: &ToolExecutionError) -> String {
        format!("Search error: {}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_sequence;
    use serde_json::json;

    #[tokio::test]
    async fn extracts_abstract_text() {
        let body = json!({"AbstractText": "Inception is a 2010 film.", "Heading": "Inception"});
        let (uri, server) = serve_sequence(vec![("200 OK", body.to_string())]).await;
        let tool = WebSearchTool::with_endpoint(uri).unwrap();

        let out = tool.run("Inception box office").await;
        assert_eq!(out, "Search results: Inception is a 2010 film.");

        let seen = server.await.unwrap();
        let line = seen[0].request_line();
        assert!(line.starts_with("GET /?q=Inception"), "{line}");
        assert!(line.contains("format=json"), "{line}");
    }

    /// **Scenario**: a response without an abstract yields the fixed fallback text.
    #[tokio::test]
    async fn missing_abstract_falls_back() {
        let (uri, _server) = serve_sequence(vec![
            ("200 OK", json!({"Heading": ""}).to_string()),
            ("200 OK", json!({"AbstractText": ""}).to_string()),
        ])
        .await;
        let tool = WebSearchTool::with_endpoint(uri).unwrap();
        assert_eq!(tool.run("zzz").await, "Search results: No results found");
        assert_eq!(tool.run("zzz").await, "Search results: No results found");
    }

    #[tokio::test]
    async fn non_json_body_is_rendered_as_search_error() {
        let (uri, _server) = serve_sequence(vec![("200 OK", "<html>".to_string())]).await;
        let out = WebSearchTool::with_endpoint(uri).unwrap().run("q").await;
        assert!(out.starts_with("Search error: "), "{out}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_rendered_as_search_error() {
        let out = WebSearchTool::with_endpoint("http://127.0.0.1:1/")
            .unwrap()
            .run("q")
            .await;
        assert!(out.starts_with("Search error: "), "{out}");
    }

    #[test]
    fn default_endpoint_is_duckduckgo() {
        let tool = WebSearchTool::new().unwrap();
        assert_eq!(tool.endpoint(), DEFAULT_WEB_SEARCH_URL);
    }
}
