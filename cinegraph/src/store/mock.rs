//! In-memory graph store for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{EnrichedMovie, GraphStats, GraphStore, Record, ResultItem, StoreError};

/// Operation that [`MockGraphStore::failing_on`] makes fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOperation {
    Execute,
    VectorSearch,
    FulltextSearch,
    MovieContext,
    MovieDetails,
    GraphStats,
}

/// Fixture-backed [`GraphStore`]. Title lookups use the same rule as the Cypher
/// traversal: case-insensitive substring, exact match first, then shortest title.
#[derive(Default)]
pub struct MockGraphStore {
    vector: Vec<ResultItem>,
    fulltext: Vec<ResultItem>,
    movies: Vec<EnrichedMovie>,
    details: BTreeMap<String, Value>,
    rows: Vec<Record>,
    stats: GraphStats,
    failing: Option<MockOperation>,
    calls: Mutex<Vec<MockOperation>>,
}

impl MockGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vector_results(mut self, items: Vec<ResultItem>) -> Self {
        self.vector = items;
        self
    }

    pub fn with_fulltext_results(mut self, items: Vec<ResultItem>) -> Self {
        self.fulltext = items;
        self
    }

    pub fn with_movie(mut self, movie: EnrichedMovie) -> Self {
        self.movies.push(movie);
        self
    }

    pub fn with_details(mut self, title: impl Into<String>, details: Value) -> Self {
        self.details.insert(title.into(), details);
        self
    }

    /// Rows returned by every raw [`GraphStore::execute`] call.
    pub fn with_rows(mut self, rows: Vec<Record>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_stats(mut self, stats: GraphStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn failing_on(mut self, op: MockOperation) -> Self {
        self.failing = Some(op);
        self
    }

    /// Operations invoked so far, in order.
    pub fn calls(&self) -> Vec<MockOperation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, op: MockOperation) -> Result<(), StoreError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(op);
        }
        if self.failing == Some(op) {
            return Err(StoreError::Transport(format!("mock failure on {:?}", op)));
        }
        Ok(())
    }

    fn best_match<'a, I>(titles: I, needle: &str) -> Option<&'a str>
    where
        I: Iterator<Item = &'a str>,
    {
        let needle = needle.to_lowercase();
        titles
            .filter(|t| t.to_lowercase().contains(&needle))
            .min_by_key(|t| (t.to_lowercase() != needle, t.len()))
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn execute(&self, _statement: &str, _params: Value) -> Result<Vec<Record>, StoreError> {
        self.record(MockOperation::Execute)?;
        Ok(self.rows.clone())
    }

    async fn vector_search(
        &self,
        _embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ResultItem>, StoreError> {
        self.record(MockOperation::VectorSearch)?;
        Ok(self.vector.iter().take(top_k).cloned().collect())
    }

    async fn fulltext_search(&self, _text: &str, top_k: usize) -> Result<Vec<ResultItem>, StoreError> {
        self.record(MockOperation::FulltextSearch)?;
        Ok(self.fulltext.iter().take(top_k).cloned().collect())
    }

    async fn movie_context(&self, title: &str) -> Result<Option<EnrichedMovie>, StoreError> {
        self.record(MockOperation::MovieContext)?;
        let best = Self::best_match(self.movies.iter().map(|m| m.title.as_str()), title);
        Ok(best.and_then(|t| self.movies.iter().find(|m| m.title == t).cloned()))
    }

    async fn movie_details(&self, title: &str) -> Result<Option<Value>, StoreError> {
        self.record(MockOperation::MovieDetails)?;
        let best = Self::best_match(self.details.keys().map(String::as_str), title);
        Ok(best.and_then(|t| self.details.get(t).cloned()))
    }

    async fn graph_stats(&self) -> Result<GraphStats, StoreError> {
        self.record(MockOperation::GraphStats)?;
        Ok(self.stats.clone())
    }
}
