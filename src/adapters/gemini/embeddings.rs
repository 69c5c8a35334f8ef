//! Gemini embedding provider adapter.
//!
//! Calls the `models/{model}:embedContent` endpoint. Documents and
//! queries use distinct task types (`RETRIEVAL_DOCUMENT` vs
//! `RETRIEVAL_QUERY`) because the model embeds the two sides of a search
//! asymmetrically.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::config::EmbeddingConfig;
use crate::domain::ports::embedding::{EmbeddingMode, EmbeddingProvider};

/// Configuration for the Gemini embedding provider.
#[derive(Debug, Clone)]
pub struct GeminiEmbeddingConfig {
    /// API key. Falls back to `GEMINI_API_KEY` env var.
    pub api_key: Option<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Embedding model (e.g., `embedding-001`).
    pub model: String,
    /// Expected embedding dimension.
    pub dimension: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiEmbeddingConfig {
    fn default() -> Self {
        Self::from_config(&EmbeddingConfig::default())
    }
}

impl GeminiEmbeddingConfig {
    /// Build adapter config from the embedding section of the main config.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self {
            api_key: None,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            dimension: config.dimension,
            timeout_secs: config.timeout_secs,
        }
    }

    fn get_api_key(&self) -> PipelineResult<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| PipelineError::Embedding {
                item: "configuration".to_string(),
                reason: "Gemini API key not set. Set GEMINI_API_KEY env var or configure api_key."
                    .to_string(),
            })
    }
}

/// Gemini embedding provider.
pub struct GeminiEmbeddingProvider {
    config: GeminiEmbeddingConfig,
    client: reqwest::Client,
}

impl GeminiEmbeddingProvider {
    pub fn new(config: GeminiEmbeddingConfig) -> PipelineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Embedding {
                item: "configuration".to_string(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    const fn task_type(mode: EmbeddingMode) -> &'static str {
        match mode {
            EmbeddingMode::Document => "RETRIEVAL_DOCUMENT",
            EmbeddingMode::Query => "RETRIEVAL_QUERY",
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    async fn embed(&self, text: &str, mode: EmbeddingMode) -> PipelineResult<Vec<f32>> {
        let api_key = self.config.get_api_key()?;
        let url = format!(
            "{}/models/{}:embedContent",
            self.config.base_url, self.config.model
        );

        let request_body = EmbedContentRequest {
            model: format!("models/{}", self.config.model),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
            task_type: Self::task_type(mode),
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| PipelineError::Embedding {
                item: "request".to_string(),
                reason: format!("Embedding API request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(PipelineError::Embedding {
                item: "request".to_string(),
                reason: format!("Embedding API returned {status}: {body}"),
            });
        }

        let result: EmbedContentResponse =
            response.json().await.map_err(|e| PipelineError::Embedding {
                item: "response".to_string(),
                reason: format!("Failed to parse embedding response: {e}"),
            })?;

        let vector = result.embedding.values;
        if vector.len() != self.config.dimension {
            return Err(PipelineError::DimensionMismatch {
                item: "embedding response".to_string(),
                expected: self.config.dimension,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }
}

// -- Gemini API request/response types --

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String, dimension: usize) -> GeminiEmbeddingConfig {
        GeminiEmbeddingConfig {
            api_key: Some("test-key".to_string()),
            base_url,
            model: "embedding-001".to_string(),
            dimension,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_default_config() {
        let config = GeminiEmbeddingConfig::default();
        assert_eq!(config.model, "embedding-001");
        assert_eq!(config.dimension, 768);
        assert!(config.base_url.contains("generativelanguage"));
    }

    #[test]
    fn test_api_key_from_config() {
        let config = GeminiEmbeddingConfig {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        assert_eq!(config.get_api_key().unwrap(), "test-key");
    }

    #[test]
    fn test_task_type_mapping() {
        assert_eq!(
            GeminiEmbeddingProvider::task_type(EmbeddingMode::Document),
            "RETRIEVAL_DOCUMENT"
        );
        assert_eq!(
            GeminiEmbeddingProvider::task_type(EmbeddingMode::Query),
            "RETRIEVAL_QUERY"
        );
    }

    #[tokio::test]
    async fn test_embed_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/embedding-001:embedContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(r#"{"embedding":{"values":[0.1,0.2,0.3]}}"#)
            .create_async()
            .await;

        let provider = GeminiEmbeddingProvider::new(test_config(server.url(), 3)).unwrap();
        let vector = provider.embed("hello", EmbeddingMode::Document).await.unwrap();

        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_embed_wrong_dimension() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/embedding-001:embedContent")
            .with_status(200)
            .with_body(r#"{"embedding":{"values":[0.1,0.2,0.3]}}"#)
            .create_async()
            .await;

        let provider = GeminiEmbeddingProvider::new(test_config(server.url(), 768)).unwrap();
        let err = provider
            .embed("hello", EmbeddingMode::Query)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::DimensionMismatch {
                expected: 768,
                actual: 3,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_embed_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/embedding-001:embedContent")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let provider = GeminiEmbeddingProvider::new(test_config(server.url(), 3)).unwrap();
        let err = provider
            .embed("hello", EmbeddingMode::Document)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Embedding { .. }));
    }
}
