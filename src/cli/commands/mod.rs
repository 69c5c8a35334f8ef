//! CLI command implementations.

pub mod ask;
pub mod refresh;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::acquisition::JsonFileSource;
use crate::adapters::gemini::{
    GeminiCompletionConfig, GeminiCompletionProvider, GeminiEmbeddingConfig,
    GeminiEmbeddingProvider,
};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::Pipeline;

/// Load configuration from an explicit file or the default hierarchy.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Wire the pipeline with the shipped collaborator adapters.
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let source = Arc::new(JsonFileSource::new(&config.acquisition.documents_file));
    let embedder = Arc::new(
        GeminiEmbeddingProvider::new(GeminiEmbeddingConfig::from_config(&config.embedding))
            .context("Failed to construct embedding client")?,
    );
    let completion = Arc::new(
        GeminiCompletionProvider::new(GeminiCompletionConfig::from_config(&config.completion))
            .context("Failed to construct completion client")?,
    );

    Pipeline::new(config, source, embedder, completion).context("Failed to construct pipeline")
}
