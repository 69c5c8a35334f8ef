//! Gemini completion provider adapter.
//!
//! Calls the `models/{model}:generateContent` endpoint once per query.
//! No streaming and no retry; a failed call fails the whole answer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::config::CompletionConfig;
use crate::domain::ports::completion::CompletionProvider;

/// Configuration for the Gemini completion provider.
#[derive(Debug, Clone)]
pub struct GeminiCompletionConfig {
    /// API key. Falls back to `GEMINI_API_KEY` env var.
    pub api_key: Option<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Generation model (e.g., `gemini-1.5-pro-002`).
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiCompletionConfig {
    fn default() -> Self {
        Self::from_config(&CompletionConfig::default())
    }
}

impl GeminiCompletionConfig {
    /// Build adapter config from the completion section of the main config.
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            api_key: None,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    fn get_api_key(&self) -> PipelineResult<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                PipelineError::Generation(
                    "Gemini API key not set. Set GEMINI_API_KEY env var or configure api_key."
                        .to_string(),
                )
            })
    }
}

/// Gemini completion provider.
pub struct GeminiCompletionProvider {
    config: GeminiCompletionConfig,
    client: reqwest::Client,
}

impl GeminiCompletionProvider {
    pub fn new(config: GeminiCompletionConfig) -> PipelineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Generation(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl CompletionProvider for GeminiCompletionProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> PipelineResult<String> {
        let api_key = self.config.get_api_key()?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| PipelineError::Generation(format!("Generation API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(PipelineError::Generation(format!(
                "Generation API returned {status}: {body}"
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Generation(format!("Failed to parse generation response: {e}")))?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PipelineError::Generation("Empty generation response".to_string()))?;

        Ok(text)
    }
}

// -- Gemini API request/response types --

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String) -> GeminiCompletionConfig {
        GeminiCompletionConfig {
            api_key: Some("test-key".to_string()),
            base_url,
            model: "gemini-1.5-pro-002".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_default_config() {
        let config = GeminiCompletionConfig::default();
        assert_eq!(config.model, "gemini-1.5-pro-002");
        assert!(config.base_url.contains("generativelanguage"));
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-pro-002:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"The answer."}]}}]}"#,
            )
            .create_async()
            .await;

        let provider = GeminiCompletionProvider::new(test_config(server.url())).unwrap();
        let text = provider.generate("question").await.unwrap();

        assert_eq!(text, "The answer.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-1.5-pro-002:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let provider = GeminiCompletionProvider::new(test_config(server.url())).unwrap();
        let err = provider.generate("question").await.unwrap_err();

        assert!(matches!(err, PipelineError::Generation(_)));
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-1.5-pro-002:generateContent")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let provider = GeminiCompletionProvider::new(test_config(server.url())).unwrap();
        let err = provider.generate("question").await.unwrap_err();

        assert!(matches!(err, PipelineError::Generation(_)));
    }
}
