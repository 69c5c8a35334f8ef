//! Document acquisition port.
//!
//! Acquisition itself (crawling, pagination, HTML extraction) is an
//! external collaborator; the pipeline only consumes its finished
//! `Document` records through this trait.

use async_trait::async_trait;

use crate::domain::errors::PipelineResult;
use crate::domain::models::Document;

/// Trait for document sources.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Source name for error reporting (e.g., "json-file").
    fn name(&self) -> &'static str;

    /// Fetch the full ordered document corpus.
    ///
    /// A malformed or unreachable source fails the whole refresh; the
    /// pipeline never indexes a partial corpus.
    async fn fetch_documents(&self) -> PipelineResult<Vec<Document>>;
}
