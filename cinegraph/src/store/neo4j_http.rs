//! Neo4j client over the HTTP transactional endpoint (`/db/{database}/tx/commit`).
//!
//! Each [`GraphStore::execute`] call is one auto-committed transaction with a single
//! statement. Rows come back as `{"columns": [...], "data": [{"row": [...]}]}` and are
//! zipped into [`Record`]s; entries in `errors` become [`StoreError::Query`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{GraphStore, Record, StoreError};

/// Connection settings. `uri` is the HTTP base, e.g. `http://localhost:7474`.
#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:7474".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            database: "neo4j".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<QueryErrorBody>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<RowData>,
}

#[derive(Debug, Deserialize)]
struct RowData {
    #[serde(default)]
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct QueryErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Graph store backed by a Neo4j server's HTTP API.
pub struct Neo4jHttpClient {
    http: reqwest::Client,
    config: Neo4jConfig,
    endpoint: String,
}

impl Neo4jHttpClient {
    pub fn new(config: Neo4jConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let endpoint = format!(
            "{}/db/{}/tx/commit",
            config.uri.trim_end_matches('/'),
            config.database
        );
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn into_records(result: StatementResult) -> Vec<Record> {
    let columns = result.columns;
    result
        .data
        .into_iter()
        .map(|d| columns.iter().cloned().zip(d.row).collect::<Record>())
        .collect()
}

#[async_trait]
impl GraphStore for Neo4jHttpClient {
    async fn execute(&self, statement: &str, params: Value) -> Result<Vec<Record>, StoreError> {
        let parameters = if params.is_null() { json!({}) } else { params };
        let body = json!({
            "statements": [{ "statement": statement, "parameters": parameters }]
        });

        tracing::debug!(endpoint = %self.endpoint, "neo4j tx/commit");
        let resp = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(StoreError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: CommitResponse = serde_json::from_str(&text)?;
        if let Some(err) = parsed.errors.into_iter().next() {
            tracing::warn!(code = %err.code, "neo4j statement failed");
            return Err(StoreError::Query {
                code: err.code,
                message: err.message,
            });
        }
        Ok(parsed
            .results
            .into_iter()
            .next()
            .map(into_records)
            .unwrap_or_default())
    }
}
