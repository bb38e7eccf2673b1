//! Environment layering for cinegraph binaries.
//!
//! Two optional files feed the process environment before `MovieAgentConfig::from_env`
//! reads it: the project `.env` and the `[env]` table of
//! `$XDG_CONFIG_HOME/<app>/config.toml`. A key already set to a non-empty value in the
//! process environment is never touched; otherwise `.env` beats XDG.
//!
//! ```toml
//! # ~/.config/cinegraph/config.toml
//! [env]
//! NEO4J_URI = "http://graph.internal:7474"
//! RETRIEVAL_TOP_K = 8
//! ```

mod env_file;
mod xdg;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use thiserror::Error;

pub use xdg::config_file;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no config directory for this platform")]
    NoConfigDir,
    #[error("read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    /// `[env]` values must be strings, numbers or booleans.
    #[error("{path}: [env].{key} must be a string, number or boolean")]
    UnsupportedValue { path: String, key: String },
    #[error("read .env: {0}")]
    EnvFile(#[from] ::dotenv::Error),
}

/// Keys [`load_and_apply`] set, by the file they came from. Sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Applied {
    pub from_env_file: Vec<String>,
    pub from_xdg: Vec<String>,
}

impl Applied {
    pub fn is_empty(&self) -> bool {
        self.from_env_file.is_empty() && self.from_xdg.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    EnvFile,
    Xdg,
}

/// Picks a value for every key the process does not define yet. `is_set` answers
/// for the process environment.
fn layer(
    env_file: HashMap<String, String>,
    xdg: HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> BTreeMap<String, (String, Origin)> {
    let mut out = BTreeMap::new();
    for (key, value) in xdg {
        if !is_set(&key) {
            out.insert(key, (value, Origin::Xdg));
        }
    }
    for (key, value) in env_file {
        if !is_set(&key) {
            out.insert(key, (value, Origin::EnvFile));
        }
    }
    out
}

/// Whether the process defines `key` with a non-empty value. Empty counts as unset.
fn is_set_in_process(key: &str) -> bool {
    std::env::var_os(key).is_some_and(|v| !v.is_empty())
}

/// Reads both files and sets each missing or empty variable in the process environment.
///
/// `.env` is looked up in `env_dir`, or the current directory when `None`. Missing
/// files contribute nothing. A malformed XDG file is an error; unparsable `.env`
/// lines are skipped.
pub fn load_and_apply(app_name: &str, env_dir: Option<&Path>) -> Result<Applied, LoadError> {
    let xdg = xdg::load_env_table(app_name)?;
    let env_file = env_file::load(env_dir)?;

    let mut applied = Applied::default();
    for (key, (value, origin)) in layer(env_file, xdg, is_set_in_process) {
        std::env::set_var(&key, value);
        match origin {
            Origin::EnvFile => applied.from_env_file.push(key),
            Origin::Xdg => applied.from_xdg.push(key),
        }
    }
    Ok(applied)
}

/// Installs a global fmt subscriber on stderr filtered by `RUST_LOG`, else by
/// `default_filter` (e.g. `"cinegraph=info"`). `false` when one was already installed.
#[cfg(feature = "tracing-init")]
pub fn init_tracing(default_filter: &str) -> bool {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

/// Tests that touch `XDG_CONFIG_HOME` or other process env take this first.
#[cfg(test)]
pub(crate) fn test_env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// **Scenario**: process env beats `.env`, which beats XDG.
    #[test]
    fn layer_priority() {
        let env_file = map(&[("NEO4J_URI", "http://dotenv:7474"), ("LLM_MODEL", "dotenv")]);
        let xdg = map(&[("NEO4J_URI", "http://xdg:7474"), ("RETRIEVAL_TOP_K", "8")]);
        let out = layer(env_file, xdg, |k| k == "LLM_MODEL");

        assert_eq!(
            out.get("NEO4J_URI"),
            Some(&("http://dotenv:7474".to_string(), Origin::EnvFile))
        );
        assert_eq!(out.get("RETRIEVAL_TOP_K"), Some(&("8".to_string(), Origin::Xdg)));
        assert!(!out.contains_key("LLM_MODEL"));
    }

    fn with_xdg_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let prev = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", dir);
        let out = f();
        match prev {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        out
    }

    #[test]
    fn applies_both_files_and_reports_origin() {
        let _guard = test_env_lock();
        let xdg_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(xdg_dir.path().join("cinegraph")).unwrap();
        std::fs::write(
            xdg_dir.path().join("cinegraph/config.toml"),
            "[env]\nCG_TEST_XDG_ONLY = \"x\"\nCG_TEST_BOTH = \"x\"\n",
        )
        .unwrap();
        let env_dir = tempfile::tempdir().unwrap();
        std::fs::write(env_dir.path().join(".env"), "CG_TEST_BOTH=d\n").unwrap();
        env::remove_var("CG_TEST_XDG_ONLY");
        env::remove_var("CG_TEST_BOTH");

        let applied =
            with_xdg_home(xdg_dir.path(), || load_and_apply("cinegraph", Some(env_dir.path())))
                .unwrap();
        let both = env::var("CG_TEST_BOTH");
        let xdg_only = env::var("CG_TEST_XDG_ONLY");
        env::remove_var("CG_TEST_XDG_ONLY");
        env::remove_var("CG_TEST_BOTH");

        assert_eq!(both.as_deref(), Ok("d"));
        assert_eq!(xdg_only.as_deref(), Ok("x"));
        assert_eq!(applied.from_env_file, vec!["CG_TEST_BOTH"]);
        assert_eq!(applied.from_xdg, vec!["CG_TEST_XDG_ONLY"]);
    }

    #[test]
    fn existing_process_value_is_kept() {
        let _guard = test_env_lock();
        let env_dir = tempfile::tempdir().unwrap();
        std::fs::write(env_dir.path().join(".env"), "CG_TEST_EXISTING=dotenv\n").unwrap();
        env::set_var("CG_TEST_EXISTING", "process");
        let applied = load_and_apply("cinegraph-test-no-such-app", Some(env_dir.path())).unwrap();
        let value = env::var("CG_TEST_EXISTING");
        env::remove_var("CG_TEST_EXISTING");

        assert_eq!(value.as_deref(), Ok("process"));
        assert!(applied.is_empty());
    }

    /// **Scenario**: an empty process value is filled from `.env`.
    #[test]
    fn empty_process_value_is_filled() {
        let _guard = test_env_lock();
        let env_dir = tempfile::tempdir().unwrap();
        std::fs::write(env_dir.path().join(".env"), "CG_TEST_EMPTY=dotenv\n").unwrap();
        env::set_var("CG_TEST_EMPTY", "");
        let applied = load_and_apply("cinegraph-test-no-such-app", Some(env_dir.path())).unwrap();
        let value = env::var("CG_TEST_EMPTY");
        env::remove_var("CG_TEST_EMPTY");

        assert_eq!(value.as_deref(), Ok("dotenv"));
        assert_eq!(applied.from_env_file, vec!["CG_TEST_EMPTY"]);
    }

    #[test]
    fn malformed_xdg_file_is_an_error() {
        let _guard = test_env_lock();
        let xdg_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(xdg_dir.path().join("cinegraph")).unwrap();
        std::fs::write(xdg_dir.path().join("cinegraph/config.toml"), "invalid [[[\n").unwrap();
        let empty = tempfile::tempdir().unwrap();

        let result = with_xdg_home(xdg_dir.path(), || {
            load_and_apply("cinegraph", Some(empty.path()))
        });
        assert!(matches!(result, Err(LoadError::Toml { .. })));
    }
}
