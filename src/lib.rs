//! Docqa — help-center question answering.
//!
//! Ingests a corpus of help articles, splits each into overlapping
//! word-count windows, embeds every window, and builds an exact
//! nearest-neighbor index persisted alongside positionally aligned
//! metadata. A query is embedded, searched, and the nearest windows are
//! assembled into a bounded context for a completion model that drafts
//! the answer.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): data models, errors, and collaborator
//!   ports (document source, embedding, completion)
//! - **Adapters** (`adapters`): HTTP clients for the Gemini APIs and the
//!   JSON-file document source
//! - **Infrastructure** (`infrastructure`): chunker, flat L2 index,
//!   artifact persistence, configuration loading
//! - **Services** (`services`): retriever, synthesizer, and the
//!   `Pipeline` facade exposing `refresh` / `answer`
//! - **CLI** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{PipelineError, PipelineResult};
pub use domain::models::{Answer, Chunk, Config, Document, EmbeddedChunk, SourceRef};
pub use domain::ports::{CompletionProvider, DocumentSource, EmbeddingMode, EmbeddingProvider};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::vector::{ArtifactStore, Chunker, FlatIndex, StoreBuilder};
pub use services::Pipeline;
