use std::sync::Arc;

use async_trait::async_trait;

use super::{Tool, ToolExecutionError};
use crate::store::GraphStore;

pub const TOOL_MOVIE_DETAILS: &str = "get_movie_details";

const DESCRIPTION: &str = "Retrieve comprehensive information about a specific movie, including its cast, director, genres, studios, and keywords.
Use this when you have a specific movie title and need more context.";

/// Full details for the best title match: cast with roles, directors, genres, studios, keywords.
pub struct MovieDetailsTool {
    store: Arc<dyn GraphStore>,
}

impl MovieDetailsTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for MovieDetailsTool {
    fn name(&self) -> &str {
        TOOL_MOVIE_DETAILS
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn call(&self, input: &str) -> Result<String, ToolExecutionError> {
        let title = input.trim();
        Ok(match self.store.movie_details(title).await? {
            Some(details) => format!("Movie details: {}", details),
            None => format!("No movie found matching '{}'", title),
        })
    }

    fn render_error(&self, err: &ToolExecutionError) -> String {
        format!("Error retrieving movie details: {}", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockGraphStore, MockOperation};
    use serde_json::json;

    #[tokio::test]
    async fn found_and_not_found() {
        let store = MockGraphStore::new().with_details(
            "Inception",
            json!({"title": "Inception", "directors": ["Christopher Nolan"]}),
        );
        let tool = MovieDetailsTool::new(Arc::new(store));
        let out = tool.run("inception").await;
        assert!(out.starts_with("Movie details: {"), "{out}");
        assert!(out.contains("Christopher Nolan"));
        assert_eq!(tool.run("Heat").await, "No movie found matching 'Heat'");
    }

    #[tokio::test]
    async fn failure_is_rendered() {
        let store = MockGraphStore::new().failing_on(MockOperation::MovieDetails);
        let out = MovieDetailsTool::new(Arc::new(store)).run("Heat").await;
        assert!(out.starts_with("Error retrieving movie details: "), "{out}");
    }
}
