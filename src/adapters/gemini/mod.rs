//! Gemini API adapters for the embedding and completion ports.

pub mod completion;
pub mod embeddings;

pub use completion::{GeminiCompletionConfig, GeminiCompletionProvider};
pub use embeddings::{GeminiEmbeddingConfig, GeminiEmbeddingProvider};
