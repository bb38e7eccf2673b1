//! Routed edges: the next stage is picked from the state after the source ran.

use std::collections::HashMap;
use std::sync::Arc;

/// Reads the state and returns a route key.
pub type RouteFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// A route function plus the table that maps its keys onto node ids.
///
/// Keys missing from the table (or every key, when there is no table) are taken as
/// node ids themselves.
pub struct Router<S> {
    decide: RouteFn<S>,
    targets: Option<HashMap<String, String>>,
}

impl<S> Clone for Router<S> {
    fn clone(&self) -> Self {
        Self {
            decide: Arc::clone(&self.decide),
            targets: self.targets.clone(),
        }
    }
}

impl<S> Router<S> {
    pub fn new(decide: RouteFn<S>, targets: Option<HashMap<String, String>>) -> Self {
        Self { decide, targets }
    }

    pub fn target_for(&self, state: &S) -> String {
        let key = (self.decide)(state);
        match self.targets.as_ref().and_then(|t| t.get(&key)) {
            Some(id) => id.clone(),
            None => key,
        }
    }

    /// Node ids named by the table; empty when keys are used directly.
    pub(super) fn declared_targets(&self) -> impl Iterator<Item = &String> {
        self.targets.iter().flat_map(|t| t.values())
    }

    /// Without a table any id, END included, may come back.
    pub(super) fn may_reach(&self, id: &str) -> bool {
        match &self.targets {
            Some(t) => t.values().any(|v| v == id),
            None => true,
        }
    }
}

/// Where execution goes once a node finished.
pub(super) enum Transition<S> {
    /// Fixed edge; the node's own [`Next`](super::Next) can still end or redirect.
    Edge(String),
    /// Routed edge; the node's `Next` is ignored.
    Routed(Router<S>),
}

impl<S> Clone for Transition<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Edge(to) => Self::Edge(to.clone()),
            Self::Routed(r) => Self::Routed(r.clone()),
        }
    }
}
