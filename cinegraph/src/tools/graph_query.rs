use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolExecutionError};
use crate::store::GraphStore;

/// Tool name for raw Cypher execution.
pub const TOOL_GRAPH_QUERY: &str = "graph_query";

const DESCRIPTION: &str = "Execute Cypher queries against the Neo4j knowledge graph.
Use this to find specific relationships, patterns, or aggregate data.

Example queries:
- Find movies by actor: MATCH (p:Person {name: 'Keanu Reeves'})-[:ACTED_IN]->(m:Movie) RETURN m.title
- Find similar movies: MATCH (m1:Movie {title: 'The Matrix'})-[:SIMILAR_TO]->(m2:Movie) RETURN m2.title, m2.rating";

/// Runs the input verbatim as a Cypher statement.
///
/// The statement is not validated or restricted: whatever the model writes is executed
/// with the store's credentials.
pub struct GraphQueryTool {
    store: Arc<dyn GraphStore>,
}

impl GraphQueryTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GraphQueryTool {
    fn name(&self) -> &str {
        TOOL_GRAPH_QUERY
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn call(&self, input: &str) -> Result<String, ToolExecutionError> {
        let statement = input.trim();
        if statement.is_empty() {
            return Err(ToolExecutionError::InvalidInput("empty query".into()));
        }
        let rows = self.store.execute(statement, Value::Null).await?;
        let rendered = serde_json::to_string(&rows)
            .map_err(|e| ToolExecutionError::InvalidInput(e.to_string()))?;
        Ok(format!("Query results: {}", rendered))
    }

    fn render_error(&self, err: &ToolExecutionError) -> String {
        format!("Error executing query: {}", err)
    }
}
