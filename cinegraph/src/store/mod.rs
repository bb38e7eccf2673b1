//! Graph store client: parameterized Cypher against the movie knowledge graph.
//!
//! [`GraphStore::execute`] is the single required method; the query shapes the
//! retriever and tools depend on (vector top-k, full-text top-k, entity-context
//! traversal, details, statistics) are provided on top of it and may be overridden.
//! Implementations: [`Neo4jHttpClient`] (Neo4j HTTP transactional API) and
//! [`MockGraphStore`] (in-memory fixtures for tests).

mod error;
mod mock;
mod model;
mod neo4j_http;
pub mod queries;

pub use error::StoreError;
pub use mock::{MockGraphStore, MockOperation};
pub use model::{decode_record, decode_records, EnrichedMovie, GraphStats, ResultItem};
pub use neo4j_http::{Neo4jConfig, Neo4jHttpClient};

use async_trait::async_trait;
use serde_json::{json, Value};

/// One result row: column name → value.
pub type Record = serde_json::Map<String, Value>;

/// Executes graph queries. Must be `Send + Sync`; concurrent queries share one client.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Runs one statement with parameters (a JSON object or `Value::Null`) and returns its rows.
    async fn execute(&self, statement: &str, params: Value) -> Result<Vec<Record>, StoreError>;

    /// Vector top-k similarity search, ordered by score descending.
    async fn vector_search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<ResultItem>, StoreError> {
        let rows = self
            .execute(
                queries::VECTOR_SEARCH,
                json!({
                    "index": queries::VECTOR_INDEX,
                    "top_k": top_k,
                    "embedding": embedding,
                }),
            )
            .await?;
        decode_records(rows)
    }

    /// Full-text top-k search, ordered by score descending. `text` is Lucene-escaped.
    async fn fulltext_search(&self, text: &str, top_k: usize) -> Result<Vec<ResultItem>, StoreError> {
        let rows = self
            .execute(
                queries::FULLTEXT_SEARCH,
                json!({
                    "index": queries::FULLTEXT_INDEX,
                    "text": queries::escape_lucene(text),
                    "top_k": top_k,
                }),
            )
            .await?;
        decode_records(rows)
    }

    /// Entity context for the best case-insensitive substring match of `title`.
    /// `None` when no movie matches.
    async fn movie_context(&self, title: &str) -> Result<Option<EnrichedMovie>, StoreError> {
        let rows = self
            .execute(queries::MOVIE_CONTEXT, json!({ "title": title }))
            .await?;
        rows.into_iter().next().map(decode_record).transpose()
    }

    /// Full details map (cast with roles, directors, genres, studios, keywords) for the
    /// best title match. `None` when no movie matches.
    async fn movie_details(&self, title: &str) -> Result<Option<Value>, StoreError> {
        let rows = self
            .execute(queries::MOVIE_DETAILS, json!({ "title": title }))
            .await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|mut r| r.remove("details")))
    }

    /// Node and relationship counts.
    async fn graph_stats(&self) -> Result<GraphStats, StoreError> {
        let rows = self.execute(queries::GRAPH_STATS, Value::Null).await?;
        match rows.into_iter().next() {
            Some(row) => decode_record(row),
            None => Ok(GraphStats::default()),
        }
    }
}
