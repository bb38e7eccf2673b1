//! Executable graph produced by [`StateGraph::compile`](super::StateGraph::compile).

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::node::{Next, Node};
use super::route::Transition;
use super::state_graph::END;

/// Upper bound on node executions per invoke. Routed edges and `Next::Node` jumps can
/// form loops the compiler does not reject.
pub const MAX_STEPS: usize = 64;

/// Immutable once built; one instance serves any number of concurrent invokes.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) entry: String,
    pub(super) transitions: HashMap<String, Transition<S>>,
}

impl<S> Clone for CompiledStateGraph<S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            entry: self.entry.clone(),
            transitions: self.transitions.clone(),
        }
    }
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Runs from the entry node until END, a node returning [`Next::End`], or a node
    /// without an outgoing edge. The first node error aborts the run unchanged.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        tracing::debug!(entry = %self.entry, "graph invoke");
        let mut state = state;
        let mut current = self.entry.clone();

        for step in 0..MAX_STEPS {
            let node = self.nodes.get(&current).ok_or_else(|| {
                AgentError::ExecutionFailed(format!("node not found: {}", current))
            })?;

            tracing::debug!(node = %current, step, "node start");
            let (next_state, next) = node.run(state).await.map_err(|e| {
                tracing::error!(node = %current, error = %e, "node failed");
                e
            })?;
            state = next_state;

            match self.successor(&current, next, &state) {
                Some(id) if id != END => {
                    tracing::debug!(from = %current, to = %id, "node complete");
                    current = id;
                }
                _ => {
                    tracing::debug!(last = %current, steps = step + 1, "graph complete");
                    return Ok(state);
                }
            }
        }
        Err(AgentError::ExecutionFailed(format!(
            "graph did not finish within {} steps",
            MAX_STEPS
        )))
    }

    fn successor(&self, current: &str, next: Next, state: &S) -> Option<String> {
        match (self.transitions.get(current), next) {
            (Some(Transition::Routed(router)), _) => Some(router.target_for(state)),
            (_, Next::End) => None,
            (_, Next::Node(id)) => Some(id),
            (Some(Transition::Edge(to)), Next::Continue) => Some(to.clone()),
            (None, Next::Continue) => None,
        }
    }
}
