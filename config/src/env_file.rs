//! Project `.env` parsing, delegated to the `dotenv` crate.

use std::collections::HashMap;
use std::path::Path;

/// Pairs from `<dir>/.env` (current directory when `dir` is `None`). A missing file
/// gives an empty map; lines the parser rejects are skipped.
pub(crate) fn load(dir: Option<&Path>) -> Result<HashMap<String, String>, ::dotenv::Error> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => match std::env::current_dir() {
            Ok(d) => d,
            Err(_) => return Ok(HashMap::new()),
        },
    };
    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(HashMap::new());
    }

    let mut pairs = HashMap::new();
    for item in ::dotenv::from_path_iter(&path)? {
        match item {
            Ok((key, value)) => {
                pairs.insert(key, value);
            }
            Err(::dotenv::Error::LineParse(..)) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> HashMap<String, String> {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), content).unwrap();
        load(Some(dir.path())).unwrap()
    }

    #[test]
    fn reads_plain_and_quoted_values() {
        let m = parse("NEO4J_USER=neo4j\nNEO4J_PASSWORD=\"p@ss word\"\nLLM_MODEL='llama'\n");
        assert_eq!(m["NEO4J_USER"], "neo4j");
        assert_eq!(m["NEO4J_PASSWORD"], "p@ss word");
        assert_eq!(m["LLM_MODEL"], "llama");
    }

    /// **Scenario**: comments, blank lines and lines without `=` contribute nothing.
    #[test]
    fn ignores_noise_lines() {
        let m = parse("# local overrides\n\nNOT_A_PAIR\nGROQ_API_KEY=gsk_x\n");
        assert_eq!(m.len(), 1);
        assert_eq!(m["GROQ_API_KEY"], "gsk_x");
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(dir.path())).unwrap().is_empty());
    }
}
