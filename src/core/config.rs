//! `.semnote/config.yaml`
//!
//! Every field has a default; a missing file means the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::BlankQuery;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path:?}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path:?}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to write config file at {path:?}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Opaque identifier of the user who owns new notes
    pub owner: String,
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: "local".to_string(),
            embedding: EmbeddingConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Deterministic local Harmonic Token Projection
    #[default]
    Htp,
    /// Hosted `/embeddings` endpoint
    Http,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Htp => "htp",
            Self::Http => "http",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: Provider,
    pub api_base: String,
    pub path: String,
    pub model: String,
    /// Name of the environment variable holding the bearer key
    pub api_key_env: Option<String>,
    pub timeout_ms: u64,
    pub dimensions: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Htp,
            api_base: "http://127.0.0.1:11434/v1".to_string(),
            path: "/embeddings".to_string(),
            model: "nomic-embed-text".to_string(),
            api_key_env: None,
            timeout_ms: 10_000,
            dimensions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub blank_query: BlankQuery,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            blank_query: BlankQuery::Skip,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let cfg: Config = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Validation(format!("cannot serialize config: {}", e)))?;
        fs::write(path, raw).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.trim().is_empty() {
            return Err(ConfigError::Validation("owner must be non-empty".to_string()));
        }
        if self.search.default_limit == 0 {
            return Err(ConfigError::Validation(
                "search.default_limit must be greater than zero".to_string(),
            ));
        }
        if self.embedding.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "embedding.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.embedding.dimensions == Some(0) {
            return Err(ConfigError::Validation(
                "embedding.dimensions must be greater than zero".to_string(),
            ));
        }
        if self.embedding.provider == Provider::Http {
            if self.embedding.api_base.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "embedding.api_base must be set for the http provider".to_string(),
                ));
            }
            if !self.embedding.path.starts_with('/') {
                return Err(ConfigError::Validation(
                    "embedding.path must start with '/'".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_or_default(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.embedding.provider, Provider::Htp);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "owner: alice\nembedding:\n  provider: http\n  model: text-embedding-3-small\nsearch:\n  blank_query: reject\n",
        )
        .unwrap();

        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.owner, "alice");
        assert_eq!(cfg.embedding.provider, Provider::Http);
        assert_eq!(cfg.embedding.model, "text-embedding-3-small");
        assert_eq!(cfg.embedding.path, "/embeddings");
        assert_eq!(cfg.search.blank_query, BlankQuery::Reject);
        assert_eq!(cfg.search.default_limit, 10);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut cfg = Config::default();
        cfg.owner = "bob".to_string();
        cfg.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_validation_errors() {
        let mut cfg = Config::default();
        cfg.search.default_limit = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

        let mut cfg = Config::default();
        cfg.owner = "  ".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.embedding.provider = Provider::Http;
        cfg.embedding.path = "embeddings".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "owner: [unclosed").unwrap();

        match Config::load(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
