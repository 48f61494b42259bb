//! # Configuration Management Module
//!
//! Loads the TOML configuration that tells the binary where game state is
//! persisted, how to log, and where the word-list build finds its inputs.
//!
//! ## Configuration Structure
//!
//! - [`StorageConfig`] - data directory and persistence backend
//! - [`LoggingConfig`] - log level and optional log file
//! - [`WordListConfig`] - input and output paths for the word-list build
//!
//! ## Usage
//!
//! ```rust,no_run
//! use freedle::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("freedle.toml").await?;
//!     println!("Data dir: {}", config.storage.data_dir);
//!     Config::create_default("freedle.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [storage]
//! data_dir = "./data"
//! backend = "sled"
//!
//! [logging]
//! level = "info"
//! file = "freedle.log"
//!
//! [wordlist]
//! word_list = "data/en.txt"
//! common_words = "data/common-words.txt"
//! dictionary_dir = "data/wordset-dictionary"
//! out_dir = "public/data"
//! ```
//!
//! Every section is optional; a missing section takes its defaults.

use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub wordlist: WordListConfig,
}

/// Persistence backend selected by `storage.backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sled,
    Json,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// One of "sled", "json", "memory". Anything else falls back to "sled".
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_backend() -> String {
    "sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: default_backend(),
        }
    }
}

impl StorageConfig {
    pub fn backend_kind(&self) -> StorageBackend {
        match self.backend.to_ascii_lowercase().as_str() {
            "sled" => StorageBackend::Sled,
            "json" => StorageBackend::Json,
            "memory" => StorageBackend::Memory,
            other => {
                warn!(
                    "Invalid storage backend '{}', defaulting to sled",
                    other
                );
                StorageBackend::Sled
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parse `level`, defaulting to `Info` for unrecognised values.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordListConfig {
    /// Newline-delimited list of every acceptable guess.
    pub word_list: String,
    /// Newline-delimited list of common words eligible as answers.
    pub common_words: String,
    /// Folder of per-source dictionary JSON files.
    pub dictionary_dir: String,
    pub out_dir: String,
}

impl Default for WordListConfig {
    fn default() -> Self {
        Self {
            word_list: "data/en.txt".to_string(),
            common_words: "data/common-words.txt".to_string(),
            dictionary_dir: "data/wordset-dictionary".to_string(),
            out_dir: "public/data".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load configuration if the file exists. A missing file yields `None`;
    /// a file that exists but cannot be read or parsed is an error.
    pub async fn load_optional(path: &str) -> Result<Option<Self>> {
        match fs::metadata(path).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            _ => Self::load(path).await.map(Some),
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
