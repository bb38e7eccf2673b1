//! `[env]` table of `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::LoadError;

/// Path of the app's config file, whether or not it exists. `XDG_CONFIG_HOME` wins
/// when set and non-empty; otherwise the platform config directory.
pub fn config_file(app_name: &str) -> Result<PathBuf, LoadError> {
    let home = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir().ok_or(LoadError::NoConfigDir)?,
    };
    Ok(home.join(app_name).join("config.toml"))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, toml::Value>,
}

/// Scalars become the strings an env var would hold (`8`, `0.2`, `true`).
fn scalar_to_string(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn load_env_table(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_file(app_name)?;
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let shown = path.display().to_string();
    let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
        path: shown.clone(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&content).map_err(|source| LoadError::Toml {
        path: shown.clone(),
        source,
    })?;

    file.env
        .into_iter()
        .map(|(key, value)| match scalar_to_string(value) {
            Some(v) => Ok((key, v)),
            None => Err(LoadError::UnsupportedValue {
                path: shown.clone(),
                key,
            }),
        })
        .collect()
}
