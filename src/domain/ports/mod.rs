//! Collaborator ports consumed by the pipeline.

pub mod acquisition;
pub mod completion;
pub mod embedding;

pub use acquisition::DocumentSource;
pub use completion::CompletionProvider;
pub use embedding::{EmbeddingMode, EmbeddingProvider};
