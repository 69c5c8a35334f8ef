//! Exact nearest-neighbor index over f32 vectors.
//!
//! An exhaustive flat scan under squared Euclidean distance. Slot `i`
//! corresponds one-to-one, by insertion order, with metadata record `i`
//! in the list built alongside it; the two are only ever persisted and
//! reloaded together (see `artifacts`).

use serde::{Deserialize, Serialize};

use crate::domain::errors::{PipelineError, PipelineResult};

/// Flat exact-L2 vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index from vectors stacked in input order.
    ///
    /// Fails if any vector's dimension differs from the first's.
    pub fn from_vectors(vectors: Vec<Vec<f32>>) -> PipelineResult<Self> {
        let dimension = vectors.first().map_or(0, Vec::len);

        for (i, vector) in vectors.iter().enumerate() {
            if vector.len() != dimension {
                return Err(PipelineError::DimensionMismatch {
                    item: format!("vector at position {i}"),
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }

        Ok(Self { dimension, vectors })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Exact k-nearest-neighbor search.
    ///
    /// Returns up to `min(k, len)` `(squared_distance, position)` pairs
    /// sorted ascending by distance, ties broken by position.
    pub fn search(&self, query: &[f32], k: usize) -> PipelineResult<Vec<(f32, usize)>> {
        if !self.is_empty() && query.len() != self.dimension {
            return Err(PipelineError::DimensionMismatch {
                item: "query vector".to_string(),
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| (squared_l2(query, vector), position))
            .collect();

        scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        scored.truncate(k);

        Ok(scored)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
