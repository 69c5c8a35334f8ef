//! Chunk models: the unit of indexing and retrieval.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An overlapping word window cut from a document.
///
/// `chunk_id` is generated fresh on every chunking run; re-chunking an
/// unchanged corpus yields identical `text`/`title`/`url` sequences but
/// new ids. A chunk also serves as the metadata record stored alongside
/// the vector index, positionally aligned with its embedding slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Fresh per-run identifier.
    pub chunk_id: Uuid,

    /// Stable id of the parent document, when the source exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Parent document title.
    pub title: String,

    /// Parent document URL.
    pub url: String,

    /// The window's words joined with single spaces.
    pub text: String,
}

/// A chunk paired with its embedding vector.
///
/// Serialized flat so the debug artifact keeps the chunk fields and the
/// vector side by side in one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    #[serde(flatten)]
    pub chunk: Chunk,

    /// Fixed-dimension f32 vector from the embedding collaborator.
    pub embedding: Vec<f32>,
}
