//! JSON-file document source.
//!
//! Reads the ordered article dump an external scraper writes (one JSON
//! array of `{id?, title, url, content}` records). Corpus order in the
//! file is corpus order everywhere downstream.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::Document;
use crate::domain::ports::acquisition::DocumentSource;

/// Document source backed by a JSON file on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn acquisition_error(&self, reason: String) -> PipelineError {
        PipelineError::Acquisition {
            origin: self.path.display().to_string(),
            reason,
        }
    }
}

#[async_trait]
impl DocumentSource for JsonFileSource {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn fetch_documents(&self) -> PipelineResult<Vec<Document>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.acquisition_error(format!("Failed to read file: {e}")))?;

        let documents: Vec<Document> = serde_json::from_str(&raw)
            .map_err(|e| self.acquisition_error(format!("Malformed document list: {e}")))?;

        tracing::debug!(
            count = documents.len(),
            path = %self.path.display(),
            "Loaded document corpus"
        );

        Ok(documents)
    }
}
