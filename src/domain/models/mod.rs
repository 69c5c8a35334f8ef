//! Domain models for the docqa pipeline.

pub mod answer;
pub mod chunk;
pub mod config;
pub mod document;

pub use answer::{Answer, SourceRef};
pub use chunk::{Chunk, EmbeddedChunk};
pub use config::{
    AcquisitionConfig, ArtifactsConfig, ChunkingConfig, CompletionConfig, Config, EmbeddingConfig,
    LoggingConfig, RetrievalConfig,
};
pub use document::Document;
