//! Pipeline facade: the `refresh` and `answer` operations exposed to
//! callers, serialized through a single Idle/Busy gate.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{Answer, Config};
use crate::domain::ports::{CompletionProvider, DocumentSource, EmbeddingProvider};
use crate::infrastructure::vector::{ArtifactStore, Chunker, StoreBuilder};
use crate::services::retriever::Retriever;
use crate::services::synthesizer::{dedup_sources, Synthesizer};

/// The chunking → indexing → retrieval pipeline.
///
/// Refresh and answer are each one blocking call chain; the gate rejects
/// an operation attempted while another holds the index/metadata pair,
/// so a query can never observe a half-written index.
pub struct Pipeline {
    source: Arc<dyn DocumentSource>,
    chunker: Chunker,
    store_builder: StoreBuilder,
    artifacts: ArtifactStore,
    retriever: Retriever,
    synthesizer: Synthesizer,
    gate: Gate,
}

/// Two-state Idle/Busy gate. The state is either [`Gate::IDLE`] or the
/// code of the operation currently holding the gate, so a rejection can
/// name what is in flight.
struct Gate {
    state: AtomicU8,
}

struct GateGuard<'a> {
    state: &'a AtomicU8,
}

impl Gate {
    const IDLE: u8 = 0;
    const REFRESH: u8 = 1;
    const ANSWER: u8 = 2;

    const fn new() -> Self {
        Self {
            state: AtomicU8::new(Self::IDLE),
        }
    }

    fn acquire(&self, code: u8) -> PipelineResult<GateGuard<'_>> {
        match self
            .state
            .compare_exchange(Self::IDLE, code, Ordering::Acquire, Ordering::Relaxed)
        {
            Ok(_) => Ok(GateGuard { state: &self.state }),
            Err(held) => Err(PipelineError::Busy {
                operation: Self::operation_name(held).to_string(),
            }),
        }
    }

    const fn operation_name(code: u8) -> &'static str {
        match code {
            Self::REFRESH => "refresh",
            Self::ANSWER => "answer",
            _ => "idle",
        }
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.state.store(Gate::IDLE, Ordering::Release);
    }
}

impl Pipeline {
    /// Wire a pipeline from configuration and collaborator clients.
    ///
    /// Fails fast on a non-terminating chunking configuration.
    pub fn new(
        config: &Config,
        source: Arc<dyn DocumentSource>,
        embedder: Arc<dyn EmbeddingProvider>,
        completion: Arc<dyn CompletionProvider>,
    ) -> PipelineResult<Self> {
        Ok(Self {
            source,
            chunker: Chunker::new(config.chunking)?,
            store_builder: StoreBuilder::new(Arc::clone(&embedder)),
            artifacts: ArtifactStore::new(&config.artifacts.dir),
            retriever: Retriever::new(embedder),
            synthesizer: Synthesizer::new(completion, config.retrieval.context_budget_chars),
            gate: Gate::new(),
        })
    }

    /// Rebuild every artifact from scratch: fetch, chunk, embed, index,
    /// persist. Any collaborator error aborts the refresh and leaves the
    /// previous artifact set untouched and queryable.
    pub async fn refresh(&self) -> PipelineResult<()> {
        let _gate = self.gate.acquire(Gate::REFRESH)?;

        let documents = self.source.fetch_documents().await?;
        tracing::info!(documents = documents.len(), "Fetched document corpus");

        let chunks = self.chunker.chunk_documents(&documents);
        tracing::info!(chunks = chunks.len(), "Chunked corpus");

        let embedded = self.store_builder.embed_all(&chunks).await?;
        let (index, metadata) = StoreBuilder::build_index(&embedded)?;

        self.artifacts
            .save(&documents, &chunks, &embedded, &index, &metadata)?;

        Ok(())
    }

    /// Answer a query from the persisted artifacts: retrieve the `k`
    /// nearest chunks, synthesize prose, and list deduplicated sources.
    pub async fn answer(&self, query: &str, k: usize) -> PipelineResult<Answer> {
        let _gate = self.gate.acquire(Gate::ANSWER)?;

        let (index, metadata) = self.artifacts.load()?;
        tracing::debug!(vectors = index.len(), "Loaded artifact set");

        let ranked = self.retriever.retrieve(query, &index, &metadata, k).await?;
        let summary = self.synthesizer.synthesize(query, &ranked).await?;
        let sources = dedup_sources(&ranked);

        Ok(Answer { summary, sources })
    }
}
