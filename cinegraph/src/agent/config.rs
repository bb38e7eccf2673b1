//! Agent configuration read from environment variables.
//!
//! Call [`env_config::load_and_apply`] first (see [`MovieAgentConfig::load`]) so values
//! from `.env` and `$XDG_CONFIG_HOME/cinegraph/config.toml` are visible here.

use std::path::Path;

use crate::embedding::DEFAULT_EMBEDDING_MODEL;
use crate::store::Neo4jConfig;
use crate::tools::DEFAULT_WEB_SEARCH_URL;

use super::runner::DEFAULT_TOP_K;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.7;
/// OpenAI-compatible embedding server (infinity, TEI) serving the MiniLM model locally.
pub const DEFAULT_EMBEDDING_BASE_URL: &str = "http://localhost:7997";

/// App directory name under `$XDG_CONFIG_HOME`.
pub const APP_NAME: &str = "cinegraph";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error(transparent)]
    Load(#[from] env_config::LoadError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Overrides the model's known dimension.
    pub dimension: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct MovieAgentConfig {
    pub neo4j: Neo4jConfig,
    pub llm: LlmSettings,
    pub embedding: EmbeddingSettings,
    pub web_search_url: String,
    pub top_k: usize,
}

fn parse<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

impl MovieAgentConfig {
    /// Applies `.env` and XDG config to the environment, then reads it.
    pub fn load(override_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let applied = env_config::load_and_apply(APP_NAME, override_dir)?;
        tracing::debug!(
            from_env_file = ?applied.from_env_file,
            from_xdg = ?applied.from_xdg,
            "config files applied"
        );
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let defaults = Neo4jConfig::default();
        let neo4j = Neo4jConfig {
            uri: or("NEO4J_URI", &defaults.uri),
            user: or("NEO4J_USER", &defaults.user),
            password: or("NEO4J_PASSWORD", &defaults.password),
            database: or("NEO4J_DATABASE", &defaults.database),
        };

        let llm = LlmSettings {
            api_key: get("GROQ_API_KEY")
                .or_else(|| get("OPENAI_API_KEY"))
                .ok_or(ConfigError::Missing("GROQ_API_KEY"))?,
            base_url: or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            model: or("LLM_MODEL", DEFAULT_LLM_MODEL),
            temperature: parse("LLM_TEMPERATURE", get("LLM_TEMPERATURE"))?
                .unwrap_or(DEFAULT_LLM_TEMPERATURE),
        };

        let embedding = EmbeddingSettings {
            api_key: get("EMBEDDING_API_KEY"),
            base_url: or("EMBEDDING_BASE_URL", DEFAULT_EMBEDDING_BASE_URL),
            model: or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            dimension: parse("EMBEDDING_DIMENSION", get("EMBEDDING_DIMENSION"))?,
        };

        let top_k = parse::<usize>("RETRIEVAL_TOP_K", get("RETRIEVAL_TOP_K"))?.unwrap_or(DEFAULT_TOP_K);
        if top_k == 0 {
            return Err(ConfigError::InvalidValue {
                name: "RETRIEVAL_TOP_K",
                value: "0".into(),
            });
        }

        Ok(Self {
            neo4j,
            llm,
            embedding,
            web_search_url: or("WEB_SEARCH_URL", DEFAULT_WEB_SEARCH_URL),
            top_k,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let c = MovieAgentConfig::from_lookup(lookup(&[("GROQ_API_KEY", "gsk")])).unwrap();
        assert_eq!(c.neo4j.uri, "http://localhost:7474");
        assert_eq!(c.neo4j.database, "neo4j");
        assert_eq!(c.llm.api_key, "gsk");
        assert_eq!(c.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert_eq!(c.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(c.llm.temperature, 0.7);
        assert_eq!(c.embedding.model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(c.embedding.dimension, None);
        assert_eq!(c.web_search_url, DEFAULT_WEB_SEARCH_URL);
        assert_eq!(c.top_k, 5);
    }

    #[test]
    fn overrides_are_read() {
        let c = MovieAgentConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk"),
            ("NEO4J_URI", "http://db:7474"),
            ("LLM_MODEL", "gpt-4o-mini"),
            ("LLM_TEMPERATURE", "0.2"),
            ("EMBEDDING_DIMENSION", "768"),
            ("RETRIEVAL_TOP_K", "8"),
        ]))
        .unwrap();
        assert_eq!(c.llm.api_key, "sk");
        assert_eq!(c.neo4j.uri, "http://db:7474");
        assert_eq!(c.llm.model, "gpt-4o-mini");
        assert_eq!(c.llm.temperature, 0.2);
        assert_eq!(c.embedding.dimension, Some(768));
        assert_eq!(c.top_k, 8);
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = MovieAgentConfig::from_lookup(lookup(&[("GROQ_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GROQ_API_KEY")));
    }

    /// **Scenario**: unparsable numbers name the offending variable.
    #[test]
    fn invalid_numbers_are_errors() {
        let err = MovieAgentConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "k"),
            ("RETRIEVAL_TOP_K", "many"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("RETRIEVAL_TOP_K"), "{err}");

        let err = MovieAgentConfig::from_lookup(lookup(&[
            ("GROQ_API_KEY", "k"),
            ("RETRIEVAL_TOP_K", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
