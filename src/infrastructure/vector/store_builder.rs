//! Vector store builder: chunks in, index plus metadata out.
//!
//! Embeds chunks strictly in input order, one collaborator call per
//! chunk, and aborts the whole build on the first failure. A partial
//! index with broken positional correspondence is worse than no index.

use std::sync::Arc;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{Chunk, EmbeddedChunk};
use crate::domain::ports::embedding::{EmbeddingMode, EmbeddingProvider};
use crate::infrastructure::vector::flat_index::FlatIndex;

/// Builds the index/metadata pair from chunk records.
pub struct StoreBuilder {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl StoreBuilder {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    /// Embed every chunk in document mode, preserving input order.
    pub async fn embed_all(&self, chunks: &[Chunk]) -> PipelineResult<Vec<EmbeddedChunk>> {
        let expected = self.embedder.dimension();
        let mut embedded = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let embedding = self
                .embedder
                .embed(&chunk.text, EmbeddingMode::Document)
                .await
                .map_err(|e| tag_chunk(e, chunk))?;

            if embedding.len() != expected {
                return Err(PipelineError::DimensionMismatch {
                    item: format!("chunk {}", chunk.chunk_id),
                    expected,
                    actual: embedding.len(),
                });
            }

            embedded.push(EmbeddedChunk {
                chunk: chunk.clone(),
                embedding,
            });
        }

        tracing::info!(count = embedded.len(), "Embedded chunk corpus");

        Ok(embedded)
    }

    /// Stack embeddings into a flat index and split off the parallel
    /// metadata list. Slot `i` of the index is metadata record `i`.
    pub fn build_index(embedded: &[EmbeddedChunk]) -> PipelineResult<(FlatIndex, Vec<Chunk>)> {
        let vectors: Vec<Vec<f32>> = embedded.iter().map(|e| e.embedding.clone()).collect();
        let metadata: Vec<Chunk> = embedded.iter().map(|e| e.chunk.clone()).collect();

        let index = FlatIndex::from_vectors(vectors)?;

        Ok((index, metadata))
    }
}

/// Attach the failing chunk's id to a collaborator error.
fn tag_chunk(e: PipelineError, chunk: &Chunk) -> PipelineError {
    match e {
        PipelineError::Embedding { reason, .. } => PipelineError::Embedding {
            item: format!("chunk {}", chunk.chunk_id),
            reason,
        },
        other => other,
    }
}
