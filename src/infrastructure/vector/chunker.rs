//! Sliding-window document chunker.
//!
//! Deterministic word-count windows with overlap: a window of `size`
//! whitespace-delimited words advances by `size - overlap` words per
//! step until a window reaches the end of the document. Chunk
//! texts are fully determined by the input; only the ids are fresh each
//! run.

use uuid::Uuid;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::config::ChunkingConfig;
use crate::domain::models::{Chunk, Document};

/// Word-window chunker.
#[derive(Debug)]
pub struct Chunker {
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a chunker, failing fast on a non-terminating configuration.
    pub fn new(config: ChunkingConfig) -> PipelineResult<Self> {
        if config.size == 0 {
            return Err(PipelineError::InvalidChunking(
                "size must be greater than 0".to_string(),
            ));
        }
        if config.overlap >= config.size {
            return Err(PipelineError::InvalidChunking(format!(
                "overlap ({}) must be less than size ({})",
                config.overlap, config.size
            )));
        }
        Ok(Self { config })
    }

    pub const fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Chunk every document, preserving document insertion order and
    /// word order within each document.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.chunk_document(doc))
            .collect()
    }

    /// Chunk one document. Empty content yields no chunks; content of
    /// `size` words or fewer yields exactly one.
    fn chunk_document(&self, document: &Document) -> Vec<Chunk> {
        let words: Vec<&str> = document.content.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }

        let stride = self.config.size - self.config.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;

        // The run ends with the window that reaches the document's end;
        // every earlier window is exactly `size` words, so consecutive
        // chunks share exactly `overlap` words.
        loop {
            let end = (start + self.config.size).min(words.len());
            chunks.push(Chunk {
                chunk_id: Uuid::new_v4(),
                source_id: document.id.clone(),
                title: document.title.clone(),
                url: document.url.clone(),
                text: words[start..end].join(" "),
            });
            if end >= words.len() {
                break;
            }
            start += stride;
        }

        chunks
    }
}
