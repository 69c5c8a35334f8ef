//! Persisted artifact set: index, metadata, and the corpus snapshots.
//!
//! The index and its metadata list are only meaningful as a pair, so
//! they live in one directory under a manifest recording vector count,
//! dimension, and an index digest. `load` verifies all three, turning a
//! mismatched pair into a load-time error instead of a silent
//! out-of-bounds lookup at query time.
//!
//! A refresh writes the complete set into a staging directory and
//! renames it over the live one only after every file is written, so a
//! failed build leaves the previous artifacts untouched and queryable.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{Chunk, Document, EmbeddedChunk};
use crate::infrastructure::vector::flat_index::FlatIndex;

const MANIFEST_VERSION: u32 = 1;

const DOCUMENTS_FILE: &str = "documents.json";
const CHUNKS_FILE: &str = "chunks.json";
const EMBEDDED_CHUNKS_FILE: &str = "embedded_chunks.json";
const INDEX_FILE: &str = "index.json";
const METADATA_FILE: &str = "metadata.json";
const MANIFEST_FILE: &str = "manifest.json";

/// Versioned description of one persisted artifact set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub vector_count: usize,
    pub dimension: usize,
    /// SHA-256 hex digest of the serialized index.
    pub index_digest: String,
    pub built_at: DateTime<Utc>,
}

/// Store for one artifact directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a complete artifact set, replacing any previous one
    /// atomically from the caller's perspective.
    pub fn save(
        &self,
        documents: &[Document],
        chunks: &[Chunk],
        embedded: &[EmbeddedChunk],
        index: &FlatIndex,
        metadata: &[Chunk],
    ) -> PipelineResult<()> {
        if index.len() != metadata.len() {
            return Err(PipelineError::IndexConsistency(format!(
                "refusing to persist {} vectors with {} metadata records",
                index.len(),
                metadata.len()
            )));
        }

        let staging = PathBuf::from(format!("{}.staging", self.dir.display()));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| artifact_error(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| artifact_error(&staging, e))?;

        let index_bytes = serde_json::to_vec(index)
            .map_err(|e| serialize_error(&staging.join(INDEX_FILE), e))?;

        let manifest = Manifest {
            version: MANIFEST_VERSION,
            vector_count: index.len(),
            dimension: index.dimension(),
            index_digest: hex_digest(&index_bytes),
            built_at: Utc::now(),
        };

        write_json(&staging.join(DOCUMENTS_FILE), documents)?;
        write_json(&staging.join(CHUNKS_FILE), chunks)?;
        write_json(&staging.join(EMBEDDED_CHUNKS_FILE), embedded)?;
        fs::write(staging.join(INDEX_FILE), &index_bytes)
            .map_err(|e| artifact_error(&staging.join(INDEX_FILE), e))?;
        write_json(&staging.join(METADATA_FILE), metadata)?;
        write_json(&staging.join(MANIFEST_FILE), &manifest)?;

        self.swap_in(&staging)?;

        tracing::info!(
            dir = %self.dir.display(),
            vectors = manifest.vector_count,
            dimension = manifest.dimension,
            "Persisted artifact set"
        );

        Ok(())
    }

    /// Load the index/metadata pair, verifying the manifest contract.
    pub fn load(&self) -> PipelineResult<(FlatIndex, Vec<Chunk>)> {
        let manifest: Manifest = read_json(&self.dir.join(MANIFEST_FILE))?;
        if manifest.version != MANIFEST_VERSION {
            return Err(PipelineError::Artifact {
                path: self.dir.display().to_string(),
                reason: format!(
                    "unsupported manifest version {} (expected {MANIFEST_VERSION})",
                    manifest.version
                ),
            });
        }

        let index_path = self.dir.join(INDEX_FILE);
        let index_bytes = fs::read(&index_path).map_err(|e| artifact_error(&index_path, e))?;

        if hex_digest(&index_bytes) != manifest.index_digest {
            return Err(PipelineError::IndexConsistency(format!(
                "index digest mismatch in {}; artifact set is corrupt or mixed",
                self.dir.display()
            )));
        }

        let index: FlatIndex = serde_json::from_slice(&index_bytes).map_err(|e| {
            PipelineError::Artifact {
                path: index_path.display().to_string(),
                reason: format!("Failed to deserialize index: {e}"),
            }
        })?;

        let metadata: Vec<Chunk> = read_json(&self.dir.join(METADATA_FILE))?;

        if index.len() != manifest.vector_count {
            return Err(PipelineError::IndexConsistency(format!(
                "index holds {} vectors but manifest records {}",
                index.len(),
                manifest.vector_count
            )));
        }
        if !index.is_empty() && index.dimension() != manifest.dimension {
            return Err(PipelineError::IndexConsistency(format!(
                "index dimension {} but manifest records {}",
                index.dimension(),
                manifest.dimension
            )));
        }
        if metadata.len() != index.len() {
            return Err(PipelineError::IndexConsistency(format!(
                "{} metadata records for {} vectors",
                metadata.len(),
                index.len()
            )));
        }

        Ok((index, metadata))
    }

    /// Rename `staging` over the live directory, parking the old set
    /// aside first so the swap is a single rename either way.
    fn swap_in(&self, staging: &Path) -> PipelineResult<()> {
        let old = PathBuf::from(format!("{}.old", self.dir.display()));
        if old.exists() {
            fs::remove_dir_all(&old).map_err(|e| artifact_error(&old, e))?;
        }

        if self.dir.exists() {
            fs::rename(&self.dir, &old).map_err(|e| artifact_error(&self.dir, e))?;
        } else if let Some(parent) = self.dir.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| artifact_error(parent, e))?;
            }
        }

        fs::rename(staging, &self.dir).map_err(|e| artifact_error(&self.dir, e))?;

        if old.exists() {
            if let Err(e) = fs::remove_dir_all(&old) {
                tracing::warn!(path = %old.display(), error = %e, "Failed to remove previous artifact set");
            }
        }

        Ok(())
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> PipelineResult<()> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| serialize_error(path, e))?;
    fs::write(path, bytes).map_err(|e| artifact_error(path, e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> PipelineResult<T> {
    let bytes = fs::read(path).map_err(|e| artifact_error(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| PipelineError::Artifact {
        path: path.display().to_string(),
        reason: format!("Malformed JSON: {e}"),
    })
}

fn artifact_error(path: &Path, e: std::io::Error) -> PipelineError {
    PipelineError::Artifact {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn serialize_error(path: &Path, e: serde_json::Error) -> PipelineError {
    PipelineError::Artifact {
        path: path.display().to_string(),
        reason: format!("Serialization failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_chunk(text: &str) -> Chunk {
        Chunk {
            chunk_id: Uuid::new_v4(),
            source_id: None,
            title: "Title".to_string(),
            url: "https://help.example.com/title".to_string(),
            text: text.to_string(),
        }
    }

    fn sample_set() -> (Vec<Document>, Vec<Chunk>, Vec<EmbeddedChunk>, FlatIndex) {
        let documents = vec![Document::new(
            None,
            "Title",
            "https://help.example.com/title",
            "alpha beta",
        )];
        let chunks = vec![sample_chunk("alpha"), sample_chunk("beta")];
        let embedded: Vec<EmbeddedChunk> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| EmbeddedChunk {
                chunk: chunk.clone(),
                embedding: vec![i as f32, 1.0],
            })
            .collect();
        let index =
            FlatIndex::from_vectors(embedded.iter().map(|e| e.embedding.clone()).collect())
                .unwrap();
        (documents, chunks, embedded, index)
    }

    #[test]
    fn test_round_trip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("artifacts"));
        let (documents, chunks, embedded, index) = sample_set();

        store
            .save(&documents, &chunks, &embedded, &index, &chunks)
            .unwrap();
        let (loaded_index, loaded_metadata) = store.load().unwrap();

        assert_eq!(loaded_index.len(), 2);
        assert_eq!(loaded_index.dimension(), 2);
        assert_eq!(loaded_metadata.len(), 2);
        assert_eq!(loaded_metadata[0].text, "alpha");
    }

    #[test]
    fn test_save_rejects_length_mismatch() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("artifacts"));
        let (documents, chunks, embedded, index) = sample_set();

        let err = store
            .save(&documents, &chunks, &embedded, &index, &chunks[..1])
            .unwrap_err();
        assert!(matches!(err, PipelineError::IndexConsistency(_)));
    }

    #[test]
    fn test_tampered_index_detected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("artifacts");
        let store = ArtifactStore::new(&dir);
        let (documents, chunks, embedded, index) = sample_set();
        store
            .save(&documents, &chunks, &embedded, &index, &chunks)
            .unwrap();

        let index_path = dir.join("index.json");
        let mut raw = fs::read_to_string(&index_path).unwrap();
        raw = raw.replace("1.0", "2.0");
        fs::write(&index_path, raw).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PipelineError::IndexConsistency(_)));
    }

    #[test]
    fn test_metadata_length_mismatch_detected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("artifacts");
        let store = ArtifactStore::new(&dir);
        let (documents, chunks, embedded, index) = sample_set();
        store
            .save(&documents, &chunks, &embedded, &index, &chunks)
            .unwrap();

        write_json(&dir.join("metadata.json"), &chunks[..1]).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PipelineError::IndexConsistency(_)));
    }

    #[test]
    fn test_load_without_refresh_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("never-built"));
        let err = store.load().unwrap_err();
        assert!(matches!(err, PipelineError::Artifact { .. }));
    }

    #[test]
    fn test_save_replaces_previous_set() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path().join("artifacts"));
        let (documents, chunks, embedded, index) = sample_set();

        store
            .save(&documents, &chunks, &embedded, &index, &chunks)
            .unwrap();

        let one_chunk = vec![sample_chunk("gamma")];
        let one_embedded = vec![EmbeddedChunk {
            chunk: one_chunk[0].clone(),
            embedding: vec![3.0, 4.0],
        }];
        let one_index = FlatIndex::from_vectors(vec![vec![3.0, 4.0]]).unwrap();
        store
            .save(&documents, &one_chunk, &one_embedded, &one_index, &one_chunk)
            .unwrap();

        let (loaded_index, loaded_metadata) = store.load().unwrap();
        assert_eq!(loaded_index.len(), 1);
        assert_eq!(loaded_metadata[0].text, "gamma");
    }
}
