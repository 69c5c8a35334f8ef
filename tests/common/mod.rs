//! Shared test doubles: deterministic in-process collaborators.

#![allow(dead_code)]

use async_trait::async_trait;
use docqa::domain::errors::{PipelineError, PipelineResult};
use docqa::domain::models::Document;
use docqa::domain::ports::{
    CompletionProvider, DocumentSource, EmbeddingMode, EmbeddingProvider,
};

/// Keyword-feature embedder: one axis per topic keyword plus a constant
/// bias axis, L2-normalized. Texts sharing a keyword land measurably
/// closer than texts that do not, and the mapping is fully deterministic.
pub struct KeywordEmbedder;

const KEYWORDS: [&str; 3] = ["billing", "password", "export"];

impl KeywordEmbedder {
    pub fn vector_for(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        let mut v: Vec<f32> = KEYWORDS
            .iter()
            .map(|kw| lower.matches(kw).count() as f32)
            .collect();
        v.push(1.0);

        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        for x in &mut v {
            *x /= norm;
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn dimension(&self) -> usize {
        KEYWORDS.len() + 1
    }

    async fn embed(&self, text: &str, _mode: EmbeddingMode) -> PipelineResult<Vec<f32>> {
        Ok(Self::vector_for(text))
    }
}

/// Embedder that fails every call, for refresh-abort scenarios.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn dimension(&self) -> usize {
        4
    }

    async fn embed(&self, _text: &str, _mode: EmbeddingMode) -> PipelineResult<Vec<f32>> {
        Err(PipelineError::Embedding {
            item: "request".to_string(),
            reason: "collaborator down".to_string(),
        })
    }
}

/// Keyword embedder with an artificial per-call delay, for exercising
/// the pipeline's Busy gate.
pub struct SlowEmbedder {
    pub delay_ms: u64,
}

#[async_trait]
impl EmbeddingProvider for SlowEmbedder {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn dimension(&self) -> usize {
        KEYWORDS.len() + 1
    }

    async fn embed(&self, text: &str, _mode: EmbeddingMode) -> PipelineResult<Vec<f32>> {
        tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        Ok(KeywordEmbedder::vector_for(text))
    }
}

/// Completion provider returning a fixed summary.
pub struct StaticCompletion(pub &'static str);

#[async_trait]
impl CompletionProvider for StaticCompletion {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn generate(&self, _prompt: &str) -> PipelineResult<String> {
        Ok(self.0.to_string())
    }
}

/// Document source serving a fixed in-memory corpus.
pub struct StaticSource(pub Vec<Document>);

#[async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_documents(&self) -> PipelineResult<Vec<Document>> {
        Ok(self.0.clone())
    }
}

/// Three-article help-center corpus used across integration tests.
pub fn sample_corpus() -> Vec<Document> {
    vec![
        Document::new(
            Some("a1".to_string()),
            "Billing",
            "https://help.example.com/billing",
            "To update billing details open the billing page and edit the \
             invoice address. Billing changes apply to the next invoice.",
        ),
        Document::new(
            Some("a2".to_string()),
            "Password reset",
            "https://help.example.com/password",
            "If you forget your password use the password reset link on the \
             sign-in page.",
        ),
        Document::new(
            Some("a3".to_string()),
            "Data export",
            "https://help.example.com/export",
            "Admins can export workspace data as CSV from the export tab.",
        ),
    ]
}
