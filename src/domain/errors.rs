//! Domain errors for the docqa retrieval pipeline.

use thiserror::Error;

/// Domain-level errors that can occur anywhere in the refresh or answer
/// call chains.
///
/// Every variant aborts the operation that raised it; the pipeline never
/// skips a failed item, since a partially built index breaks positional
/// correspondence with its metadata.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Document acquisition failed ({origin}): {reason}")]
    Acquisition { origin: String, reason: String },

    #[error("Invalid chunking configuration: {0}")]
    InvalidChunking(String),

    #[error("Embedding failed for {item}: {reason}")]
    Embedding { item: String, reason: String },

    #[error("Embedding for {item} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        item: String,
        expected: usize,
        actual: usize,
    },

    #[error("Index consistency violation: {0}")]
    IndexConsistency(String),

    #[error("Answer generation failed: {0}")]
    Generation(String),

    #[error("Artifact error at {path}: {reason}")]
    Artifact { path: String, reason: String },

    #[error("Busy: {operation} is in progress")]
    Busy { operation: String },
}

pub type PipelineResult<T> = Result<T, PipelineError>;
