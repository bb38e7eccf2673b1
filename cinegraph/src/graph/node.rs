//! Graph nodes and the step they ask for next.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

/// What a node wants after it ran. A routed edge on the node overrides this.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Take the node's outgoing edge; a node without one ends the run.
    Continue,
    /// Jump to this node id.
    Node(String),
    /// Finish with the current state.
    End,
}

/// One workflow stage. Consumes the state and hands back the updated state.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Stage name, e.g. `"retrieve_context"`. Unique within a graph.
    fn id(&self) -> &str;

    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
