//! Workflow runtime: a small state graph of async nodes.
//!
//! The agent registers its four stages as [`Node`]s, wires them with fixed edges and
//! one routed edge, and compiles once. [`CompiledStateGraph::invoke`] then walks the
//! graph for each query, threading the state through one node at a time.

mod compile_error;
mod compiled;
mod node;
mod route;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, MAX_STEPS};
pub use node::{Next, Node};
pub use route::{RouteFn, Router};
pub use state_graph::{StateGraph, END, START};
