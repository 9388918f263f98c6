//! User configuration: stopword language, stopword whitelist, ranking mode,
//! and result count. Stored as JSON in the data directory; every field can
//! be overridden per invocation from the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    index::IndexConfig,
    normalize::Language,
    rank::RankingMode,
    search::DEFAULT_TOP_K,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub language: Language,
    /// Domain-significant terms that must never be treated as stopwords.
    pub whitelist: Vec<String>,
    pub ranking_mode: RankingMode,
    pub top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            whitelist: Vec::new(),
            ranking_mode: RankingMode::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl SearchConfig {
    /// Read the config file, or fall back to defaults when it is missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Config(format!("invalid config file {}: {e}", path.display()))
        })
    }

    /// The build-time normalizer settings derived from this config.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            language: self.language,
            whitelist: self.whitelist.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.language, Language::Indonesian);
        assert!(config.whitelist.is_empty());
        assert_eq!(config.ranking_mode, RankingMode::TermFrequency);
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = SearchConfig::load_or_default(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config.top_k, 5);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"language":"english","top_k":10}"#).unwrap();

        let config = SearchConfig::load_or_default(&path).unwrap();
        assert_eq!(config.language, Language::English);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.ranking_mode, RankingMode::TermFrequency);
    }

    #[test]
    fn ranking_mode_uses_kebab_case() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"ranking_mode":"tf-idf"}"#).unwrap();

        let config = SearchConfig::load_or_default(&path).unwrap();
        assert_eq!(config.ranking_mode, RankingMode::TfIdf);
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = SearchConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
