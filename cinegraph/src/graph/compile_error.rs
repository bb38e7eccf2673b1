//! Errors from [`StateGraph::compile`](super::StateGraph::compile).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// An edge or route names a node that was never added.
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("graph has no entry edge from START")]
    NoEntry,

    #[error("START has more than one outgoing edge")]
    AmbiguousEntry,

    #[error("no edge or route reaches END")]
    NoExit,

    /// Two fixed edges leave the same node.
    #[error("node '{0}' has more than one outgoing edge")]
    Branching(String),

    /// A node has a fixed edge and a routed edge at once.
    #[error("node '{0}' has both a fixed edge and a routed edge")]
    EdgeAndRoute(String),

    /// Only detected for graphs made of fixed edges.
    #[error("fixed edges loop back to '{0}'")]
    Cycle(String),
}
