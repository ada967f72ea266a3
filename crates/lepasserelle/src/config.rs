// Engine Configuration
//
// *La Configuration* (The Configuration) - Limits and advisory thresholds for mgsearch

use anyhow::{Context, Result};
use lestockage::{DEFAULT_CAPACITY, MAX_BODY_LENGTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "mgsearch.toml";

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Ranked keyword search settings
    pub search: SearchConfig,

    /// Autocomplete settings
    pub suggest: SuggestConfig,

    /// Document store limits
    pub store: StoreConfig,

    /// Baseline suggestion scores per provenance
    pub ingest: IngestConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(EngineConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;

        Ok(config)
    }

    /// Save configuration as pretty TOML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Defaults with environment overrides applied
    ///
    /// Environment variables:
    /// - `MGSEARCH_MAX_RESULTS` - Result cap for search
    /// - `MGSEARCH_MAX_SUGGESTIONS` - Result cap for autocomplete
    /// - `MGSEARCH_DOCUMENT_CAPACITY` - Document store bound
    /// - `MGSEARCH_MAX_BODY_LENGTH` - Stored body cap in bytes
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of this configuration
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_usize("MGSEARCH_MAX_RESULTS") {
            self.search.max_results = v;
        }
        if let Some(v) = env_usize("MGSEARCH_MAX_SUGGESTIONS") {
            self.suggest.max_suggestions = v;
        }
        if let Some(v) = env_usize("MGSEARCH_DOCUMENT_CAPACITY") {
            self.store.document_capacity = v;
        }
        if let Some(v) = env_usize("MGSEARCH_MAX_BODY_LENGTH") {
            self.store.max_body_length = v;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid(
                "search.max_results must be greater than zero".to_string(),
            ));
        }

        if self.suggest.max_suggestions == 0 {
            return Err(ConfigError::Invalid(
                "suggest.max_suggestions must be greater than zero".to_string(),
            ));
        }

        if self.store.document_capacity == 0 {
            return Err(ConfigError::Invalid(
                "store.document_capacity must be greater than zero".to_string(),
            ));
        }

        for (name, value) in [
            ("search.relevance_threshold", self.search.relevance_threshold),
            ("suggest.suggestion_threshold", self.suggest.suggestion_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within 0.0-1.0, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("ingest.document_score", self.ingest.document_score),
            ("ingest.commit_score", self.ingest.commit_score),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// Ranked search configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Intended minimum relevance (advisory, not enforced by the scorer)
    pub relevance_threshold: f32,

    /// Hard cap on returned results
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: 0.1,
            max_results: 10,
        }
    }
}

/// Autocomplete configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuggestConfig {
    /// Intended minimum suggestion score (advisory, not enforced)
    pub suggestion_threshold: f32,

    /// Hard cap on returned suggestions
    pub max_suggestions: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            suggestion_threshold: 0.1,
            max_suggestions: 10,
        }
    }
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of documents
    pub document_capacity: usize,

    /// Stored body cap in bytes
    pub max_body_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            document_capacity: DEFAULT_CAPACITY,
            max_body_length: MAX_BODY_LENGTH,
        }
    }
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IngestConfig {
    /// Suggestion score for words from files and documents
    pub document_score: f32,

    /// Suggestion score for words from commit messages
    pub commit_score: f32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            document_score: 0.6,
            commit_score: 0.7,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
