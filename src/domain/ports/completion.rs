//! Completion provider port for answer generation.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;

/// Trait for text generation providers.
///
/// One call per query: no streaming, no retry. The returned text is
/// passed to the caller verbatim.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "gemini").
    fn name(&self) -> &'static str;

    /// Generate prose for the given prompt.
    async fn generate(&self, prompt: &str) -> PipelineResult<String>;
}
