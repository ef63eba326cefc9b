use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),

    #[error("Invalid vector mode: {0}. Must be one of: single, named")]
    InvalidVectorMode(String),

    #[error("Invalid index URL: {0}. Must start with http:// or https://")]
    InvalidIndexUrl(String),

    #[error("Invalid retrieval limit: must be at least 1")]
    InvalidRetrievalLimit,

    #[error("Invalid score threshold: {0}. Must be a finite number")]
    InvalidScoreThreshold(f32),

    #[error("Invalid embedding dimension: must be at least 1")]
    InvalidEmbeddingDimension,

    #[error("Invalid max_context_chars: must be at least 1")]
    InvalidMaxContextChars,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .grimoire/config.yaml (project config)
    /// 3. .grimoire/local.yaml (project local overrides, optional)
    /// 4. Environment variables (GRIMOIRE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".grimoire/config.yaml"))
            .merge(Yaml::file(".grimoire/local.yaml"))
            .merge(Env::prefixed("GRIMOIRE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("GRIMOIRE_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        config
            .chunking
            .validate()
            .map_err(ConfigError::InvalidChunking)?;

        if let Some(mode) = config.index.vector_mode.as_deref() {
            if mode != "single" && mode != "named" {
                return Err(ConfigError::InvalidVectorMode(mode.to_string()));
            }
        }

        // An empty URL is allowed at load time (not every command needs the
        // index); a non-empty one must at least carry an http(s) scheme.
        let url = config.index.url.trim();
        if !url.is_empty() && !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidIndexUrl(config.index.url.clone()));
        }

        if config.retrieval.limit == 0 {
            return Err(ConfigError::InvalidRetrievalLimit);
        }

        if !config.retrieval.score_threshold.is_finite() {
            return Err(ConfigError::InvalidScoreThreshold(
                config.retrieval.score_threshold,
            ));
        }

        if config.retrieval.max_context_chars == 0 {
            return Err(ConfigError::InvalidMaxContextChars);
        }

        if config.workers_ai.embedding_dimension == 0 {
            return Err(ConfigError::InvalidEmbeddingDimension);
        }

        Ok(())
    }
}
