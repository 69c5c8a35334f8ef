//! Embedding provider port for semantic vector generation.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;

/// How the provider should treat the text being embedded.
///
/// Documents and queries may be embedded asymmetrically by the model, so
/// callers must pass the mode matching their side of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingMode {
    /// Corpus text being indexed.
    Document,
    /// Free-text query being searched.
    Query,
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &'static str;

    /// Embedding dimension for this provider/model. Every vector in one
    /// index must share this dimension.
    fn dimension(&self) -> usize;

    /// Generate an embedding for a single text in the given mode.
    async fn embed(&self, text: &str, mode: EmbeddingMode) -> PipelineResult<Vec<f32>>;
}
