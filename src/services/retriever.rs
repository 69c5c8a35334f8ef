//! Query-time retrieval: embed the query, search, map to metadata.

use std::sync::Arc;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::Chunk;
use crate::domain::ports::embedding::{EmbeddingMode, EmbeddingProvider};
use crate::infrastructure::vector::flat_index::FlatIndex;

/// Maps a free-text query to its ranked chunk metadata.
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    /// Retrieve the `k` chunks nearest the query.
    ///
    /// The query is embedded in query mode (not document mode), searched
    /// against the index, and each returned position dereferenced into
    /// the parallel metadata list. Ranking order is preserved; distances
    /// do not cross this boundary.
    pub async fn retrieve(
        &self,
        query: &str,
        index: &FlatIndex,
        metadata: &[Chunk],
        k: usize,
    ) -> PipelineResult<Vec<Chunk>> {
        let query_vector = self
            .embedder
            .embed(query, EmbeddingMode::Query)
            .await
            .map_err(|e| match e {
                PipelineError::Embedding { reason, .. } => PipelineError::Embedding {
                    item: "query".to_string(),
                    reason,
                },
                other => other,
            })?;

        let hits = index.search(&query_vector, k)?;

        tracing::debug!(hits = hits.len(), k, "Nearest-neighbor search complete");

        hits.into_iter()
            .map(|(_distance, position)| {
                metadata.get(position).cloned().ok_or_else(|| {
                    // Unreachable while the positional invariant holds;
                    // surfaced rather than skipped if it ever breaks.
                    PipelineError::IndexConsistency(format!(
                        "search returned position {position} but only {} metadata records exist",
                        metadata.len()
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use uuid::Uuid;

    struct AxisEmbedder;

    #[async_trait]
    impl EmbeddingProvider for AxisEmbedder {
        fn name(&self) -> &'static str {
            "axis"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed(&self, text: &str, _mode: EmbeddingMode) -> PipelineResult<Vec<f32>> {
            // "x" lands on the x axis, anything else on the y axis.
            if text.contains('x') {
                Ok(vec![1.0, 0.0])
            } else {
                Ok(vec![0.0, 1.0])
            }
        }
    }

    fn chunk(text: &str) -> Chunk {
        Chunk {
            chunk_id: Uuid::new_v4(),
            source_id: None,
            title: text.to_uppercase(),
            url: format!("https://example.com/{text}"),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_retrieve_maps_positions_to_metadata() {
        let index = FlatIndex::from_vectors(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let metadata = vec![chunk("x-article"), chunk("other")];
        let retriever = Retriever::new(Arc::new(AxisEmbedder));

        let ranked = retriever
            .retrieve("where is x", &index, &metadata, 1)
            .await
            .unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].text, "x-article");
    }

    #[tokio::test]
    async fn test_retrieve_clamps_k() {
        let index = FlatIndex::from_vectors(vec![vec![1.0, 0.0]]).unwrap();
        let metadata = vec![chunk("only")];
        let retriever = Retriever::new(Arc::new(AxisEmbedder));

        let ranked = retriever
            .retrieve("anything", &index, &metadata, 10)
            .await
            .unwrap();

        assert_eq!(ranked.len(), 1);
    }

    #[tokio::test]
    async fn test_metadata_shorter_than_index_is_fatal() {
        let index = FlatIndex::from_vectors(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        // Broken pair: two vectors, one metadata record.
        let metadata = vec![chunk("only")];
        let retriever = Retriever::new(Arc::new(AxisEmbedder));

        let err = retriever
            .retrieve("no match", &index, &metadata, 2)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::IndexConsistency(_)));
    }
}
