//! Configuration tree for the docqa pipeline.
//!
//! Every collaborator client receives its section of this tree at
//! construction; there is no process-wide implicit state.

use serde::{Deserialize, Serialize};

/// Main configuration structure for docqa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Artifact storage configuration.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    /// Document acquisition configuration.
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Chunking configuration.
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Retrieval configuration.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Embedding collaborator configuration.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Completion collaborator configuration.
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the persisted index/metadata artifact set lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ArtifactsConfig {
    /// Directory holding documents, chunks, index, metadata, and manifest.
    #[serde(default = "default_artifacts_dir")]
    pub dir: String,
}

fn default_artifacts_dir() -> String {
    ".docqa/artifacts".to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
        }
    }
}

/// Document acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AcquisitionConfig {
    /// Path to the JSON article dump produced by the scraper.
    #[serde(default = "default_documents_file")]
    pub documents_file: String,
}

fn default_documents_file() -> String {
    "articles.json".to_string()
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            documents_file: default_documents_file(),
        }
    }
}

/// Sliding-window chunking configuration.
///
/// Windows are `size` whitespace-delimited words wide and advance by
/// `size - overlap` words per step, so `overlap` must stay below `size`
/// or the window never advances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Window width in words.
    #[serde(default = "default_chunk_size")]
    pub size: usize,

    /// Words shared between consecutive windows of one document.
    #[serde(default = "default_chunk_overlap")]
    pub overlap: usize,
}

const fn default_chunk_size() -> usize {
    300
}

const fn default_chunk_overlap() -> usize {
    50
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            size: default_chunk_size(),
            overlap: default_chunk_overlap(),
        }
    }
}

/// Retrieval configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Default number of chunks retrieved per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Character budget for the assembled context block.
    #[serde(default = "default_context_budget")]
    pub context_budget_chars: usize,
}

const fn default_top_k() -> usize {
    5
}

const fn default_context_budget() -> usize {
    20_000
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            context_budget_chars: default_context_budget(),
        }
    }
}

/// Embedding collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Embedding model name.
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Base URL for the embedding API.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Expected embedding dimension; responses of any other width abort
    /// the build.
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
}

fn default_embedding_model() -> String {
    "embedding-001".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

const fn default_embedding_dimension() -> usize {
    768
}

const fn default_embedding_timeout() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            base_url: default_gemini_base_url(),
            dimension: default_embedding_dimension(),
            timeout_secs: default_embedding_timeout(),
        }
    }
}

/// Completion collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompletionConfig {
    /// Generation model name.
    #[serde(default = "default_completion_model")]
    pub model: String,

    /// Base URL for the generation API.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,
}

fn default_completion_model() -> String {
    "gemini-1.5-pro-002".to_string()
}

const fn default_completion_timeout() -> u64 {
    60
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_completion_model(),
            base_url: default_gemini_base_url(),
            timeout_secs: default_completion_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
