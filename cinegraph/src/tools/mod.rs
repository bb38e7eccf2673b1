//! Tool set: single-string-in, single-string-out capabilities the agent may invoke.
//!
//! The default set is [`GraphQueryTool`], [`WebSearchTool`] and [`CalculatorTool`],
//! registered in that order by [`default_registry`]. [`MovieDetailsTool`] and
//! [`VectorSearchTool`] are available for callers that extend the set.

pub mod calculator;
mod error;
mod graph_query;
mod movie_details;
mod registry;
mod r#trait;
mod vector_search;
mod web_search;

use std::sync::Arc;

pub use calculator::{CalculatorTool, TOOL_CALCULATOR};
pub use error::ToolExecutionError;
pub use graph_query::{GraphQueryTool, TOOL_GRAPH_QUERY};
pub use movie_details::{MovieDetailsTool, TOOL_MOVIE_DETAILS};
pub use r#trait::{Tool, ToolDescriptor};
pub use registry::ToolRegistry;
pub use vector_search::{VectorSearchTool, TOOL_VECTOR_SEARCH};
pub use web_search::{WebSearchTool, DEFAULT_WEB_SEARCH_URL, TOOL_WEB_SEARCH};

use crate::embedding::Embedder;
use crate::store::GraphStore;

/// `graph_query`, `web_search`, `calculator`, in that order.
pub fn default_registry(store: Arc<dyn GraphStore>, web_search: WebSearchTool) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(GraphQueryTool::new(store)));
    registry.register(Box::new(web_search));
    registry.register(Box::new(CalculatorTool::new()));
    registry
}

/// Appends `get_movie_details` and `vector_search_movies`.
pub fn register_movie_tools(
    registry: &mut ToolRegistry,
    store: Arc<dyn GraphStore>,
    embedder: Arc<dyn Embedder>,
) {
    registry.register(Box::new(MovieDetailsTool::new(store.clone())));
    registry.register(Box::new(VectorSearchTool::new(store, embedder)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbedder;
    use crate::store::MockGraphStore;

    #[test]
    fn default_registry_order() {
        let store: Arc<dyn GraphStore> = Arc::new(MockGraphStore::new());
        let mut r = default_registry(store.clone(), WebSearchTool::new().unwrap());
        let names = |r: &ToolRegistry| -> Vec<String> {
            r.descriptors().into_iter().map(|d| d.name).collect()
        };
        assert_eq!(names(&r), vec!["graph_query", "web_search", "calculator"]);

        register_movie_tools(&mut r, store, Arc::new(MockEmbedder::default()));
        assert_eq!(
            names(&r),
            vec![
                "graph_query",
                "web_search",
                "calculator",
                "get_movie_details",
                "vector_search_movies"
            ]
        );
    }
}
