//! RetrieveContext node: hybrid retrieval into `graph_context` and `vector_results`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::retrieval::HybridRetriever;

use super::state::AgentState;

pub struct RetrieveContextNode {
    retriever: Arc<HybridRetriever>,
    top_k: usize,
}

impl RetrieveContextNode {
    pub fn new(retriever: Arc<HybridRetriever>, top_k: usize) -> Self {
        Self { retriever, top_k }
    }
}

#[async_trait]
impl Node<AgentState> for RetrieveContextNode {
    fn id(&self) -> &str {
        "retrieve_context"
    }

    async fn run(&self, mut state: AgentState) -> Result<(AgentState, Next), AgentError> {
        let output = self.retriever.retrieve(&state.query, self.top_k).await?;
        state.graph_context = Some(output.context_text());
        state.vector_results = Some(output.vector_results);
        Ok((state, Next::Continue))
    }
}
