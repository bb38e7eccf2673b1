//! Graph builder: register nodes, connect them, compile.
//!
//! Each node leaves through exactly one fixed edge ([`StateGraph::add_edge`]), one
//! routed edge ([`StateGraph::add_conditional_edges`]) or nothing, in which case the
//! run ends after it. `START` and `END` mark entry and exit.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use super::compile_error::CompilationError;
use super::compiled::CompiledStateGraph;
use super::node::Node;
use super::route::{RouteFn, Router, Transition};

pub const START: &str = "__start__";
pub const END: &str = "__end__";

pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    routes: Vec<(String, Router<S>)>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Registers `node` under `id`. A second node with the same id replaces the first.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    /// After `source` runs, `route(state)` yields a key; `targets` maps keys onto node
    /// ids (or `END`). Keys absent from `targets` are used as node ids directly.
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "retrieve_context",
    ///     Arc::new(|s: &AgentState| should_use_tools(&s.query).as_key().to_string()),
    ///     Some([
    ///         ("use_tools".into(), "reason_with_tools".into()),
    ///         ("skip_tools".into(), "generate_answer".into()),
    ///     ].into()),
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        route: RouteFn<S>,
        targets: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.routes.push((source.into(), Router::new(route, targets)));
        self
    }

    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.check_known_nodes()?;
        let entry = self.entry()?;
        self.check_exit()?;
        let transitions = self.transitions()?;
        if self.routes.is_empty() {
            check_acyclic(&entry, &transitions)?;
        }
        Ok(CompiledStateGraph {
            nodes: self.nodes,
            entry,
            transitions,
        })
    }

    fn is_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn check_known_nodes(&self) -> Result<(), CompilationError> {
        let edge_ends = self.edges.iter().flat_map(|(from, to)| {
            [(from, from.as_str() == START), (to, to.as_str() == END)]
        });
        for (id, sentinel) in edge_ends {
            if !sentinel && !self.is_node(id) {
                return Err(CompilationError::UnknownNode(id.clone()));
            }
        }
        for (source, router) in &self.routes {
            if !self.is_node(source) {
                return Err(CompilationError::UnknownNode(source.clone()));
            }
            if let Some(t) = router
                .declared_targets()
                .find(|t| t.as_str() != END && !self.is_node(t))
            {
                return Err(CompilationError::UnknownNode(t.clone()));
            }
        }
        Ok(())
    }

    fn entry(&self) -> Result<String, CompilationError> {
        let mut from_start = self.edges.iter().filter(|(f, _)| f == START);
        match (from_start.next(), from_start.next()) {
            (Some((_, first)), None) => Ok(first.clone()),
            (Some(_), Some(_)) => Err(CompilationError::AmbiguousEntry),
            (None, _) => Err(CompilationError::NoEntry),
        }
    }

    fn check_exit(&self) -> Result<(), CompilationError> {
        let by_edge = self.edges.iter().any(|(_, to)| to == END);
        let by_route = self.routes.iter().any(|(_, r)| r.may_reach(END));
        if by_edge || by_route {
            Ok(())
        } else {
            Err(CompilationError::NoExit)
        }
    }

    fn transitions(&self) -> Result<HashMap<String, Transition<S>>, CompilationError> {
        let mut out = HashMap::new();
        for (from, to) in self.edges.iter().filter(|(f, _)| f != START) {
            if out.insert(from.clone(), Transition::Edge(to.clone())).is_some() {
                return Err(CompilationError::Branching(from.clone()));
            }
        }
        for (source, router) in &self.routes {
            if out
                .insert(source.clone(), Transition::Routed(router.clone()))
                .is_some()
            {
                return Err(CompilationError::EdgeAndRoute(source.clone()));
            }
        }
        Ok(out)
    }
}

fn check_acyclic<S>(
    entry: &str,
    transitions: &HashMap<String, Transition<S>>,
) -> Result<(), CompilationError> {
    let mut seen = HashSet::from([entry.to_string()]);
    let mut current = entry;
    while let Some(Transition::Edge(next)) = transitions.get(current) {
        if next == END {
            break;
        }
        if !seen.insert(next.clone()) {
            return Err(CompilationError::Cycle(next.clone()));
        }
        current = next.as_str();
    }
    Ok(())
}
