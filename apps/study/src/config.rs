//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `LINGUA_DATA_DIR` | platform local data dir + `/lingua` |
//! | `LINGUA_STORE` | `sqlite` (`json` for a single snapshot file) |
//! | `LINGUA_ALGORITHM` | `sm2` |
//! | `RUST_LOG` | `info` |

use flashcard_core::get_algorithm;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown store backend: {0} (expected sqlite or json)")]
    UnknownStore(String),

    #[error("unknown scheduling algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Where cards are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Json,
}

impl StoreBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn file_name(&self) -> &'static str {
        match self {
            Self::Sqlite => "flashcards.db",
            Self::Json => "flashcards.json",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store: StoreBackend,
    pub algorithm: String,
    pub log_filter: String,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("LINGUA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let store = match lookup("LINGUA_STORE") {
            Some(value) => StoreBackend::from_str(&value).ok_or(ConfigError::UnknownStore(value))?,
            None => StoreBackend::Sqlite,
        };

        let algorithm = lookup("LINGUA_ALGORITHM").unwrap_or_else(|| "sm2".to_string());
        if get_algorithm(&algorithm).is_none() {
            return Err(ConfigError::UnknownAlgorithm(algorithm));
        }

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            data_dir,
            store,
            algorithm,
            log_filter,
        })
    }

    /// Path of the card store inside the data directory.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(self.store.file_name())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lingua")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert_eq!(config.algorithm, "sm2");
        assert_eq!(config.log_filter, "info");
        assert!(config.data_dir.ends_with("lingua"));
        assert!(config.store_path().ends_with("flashcards.db"));
    }

    #[test]
    fn json_store_in_custom_dir() {
        let config = Config::from_lookup(lookup(&[
            ("LINGUA_DATA_DIR", "/tmp/lingua-test"),
            ("LINGUA_STORE", "JSON"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.store, StoreBackend::Json);
        assert_eq!(config.store_path(), PathBuf::from("/tmp/lingua-test/flashcards.json"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_unknown_store() {
        let err = Config::from_lookup(lookup(&[("LINGUA_STORE", "indexeddb")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownStore("indexeddb".to_string()));
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let err = Config::from_lookup(lookup(&[("LINGUA_ALGORITHM", "leitner")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownAlgorithm("leitner".to_string()));
    }
}
