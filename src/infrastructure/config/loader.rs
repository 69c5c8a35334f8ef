use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid chunking: overlap ({overlap}) must be less than size ({size})")]
    InvalidChunking { size: usize, overlap: usize },

    #[error("Invalid chunk size: must be greater than 0")]
    ZeroChunkSize,

    #[error("Invalid top_k: must be at least 1")]
    ZeroTopK,

    #[error("Invalid embedding dimension: must be greater than 0")]
    ZeroDimension,

    #[error("Artifacts directory cannot be empty")]
    EmptyArtifactsDir,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. docqa.yaml in the working directory
    /// 3. Environment variables (`DOCQA_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("docqa.yaml"))
            .merge(Env::prefixed("DOCQA_").split("__"))
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
        if config.chunking.size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if config.chunking.overlap >= config.chunking.size {
            return Err(ConfigError::InvalidChunking {
                size: config.chunking.size,
                overlap: config.chunking.overlap,
            });
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }

        if config.embedding.dimension == 0 {
            return Err(ConfigError::ZeroDimension);
        }

        if config.artifacts.dir.is_empty() {
            return Err(ConfigError::EmptyArtifactsDir);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
