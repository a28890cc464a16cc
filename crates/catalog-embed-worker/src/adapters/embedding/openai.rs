//! Embedding Service - OpenAI-compatible HTTP endpoint
//!
//! Defaults to OpenAI's text-embedding-3-small; any server exposing the same
//! `/embeddings` contract (including ones hosting all-MiniLM-L6-v2) works.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use catalog_embed::{DomainError, EmbeddingService};

use crate::config::EmbeddingConfig;

/// Text sent to the endpoint at startup to verify it and learn the vector size
const PROBE_TEXT: &str = "ready";

/// HTTP embedding service
pub struct OpenAiEmbeddingService {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: Option<usize>,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbeddingService {
    /// Create the service without contacting the endpoint
    pub fn new(config: &EmbeddingConfig, timeout: Duration) -> Result<Self, DomainError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| DomainError::missing_config("EMBEDDING_API_KEY"))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Model(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            dimensions: None,
        })
    }

    /// Create the service and probe the endpoint once, fixing the dimensions
    pub async fn connect(config: &EmbeddingConfig, timeout: Duration) -> Result<Self, DomainError> {
        let mut service = Self::new(config, timeout)?;
        let probe = service.embed(PROBE_TEXT).await?;
        service.dimensions = Some(probe.len());
        Ok(service)
    }
}

#[async_trait]
impl EmbeddingService for OpenAiEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest {
            input: text,
            model: &self.model,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Model(format!("Embedding request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DomainError::Model(format!(
                "Embedding API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Model(format!("Malformed embedding response: {e}")))?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DomainError::Model("No embedding returned".to_string()))
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmbeddingProvider;
    use mockito::Matcher;
    use serde_json::json;

    fn config(base_url: &str) -> EmbeddingConfig {
        EmbeddingConfig {
            provider: EmbeddingProvider::OpenAi,
            model: "all-minilm".to_string(),
            api_key: Some("sk-test".to_string()),
            base_url: format!("{}/v1/", base_url),
        }
    }

    #[tokio::test]
    async fn test_embed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/embeddings")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::Json(json!({"input": "Product: Widget", "model": "all-minilm"})))
            .with_status(200)
            .with_body(json!({"data": [{"embedding": [0.1, 0.2, 0.3]}]}).to_string())
            .create_async()
            .await;

        let service =
            OpenAiEmbeddingService::new(&config(&server.url()), Duration::from_secs(5)).unwrap();
        let vector = service.embed("Product: Widget").await.unwrap();

        mock.assert_async().await;
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
        assert_eq!(service.dimensions(), None);
    }

    #[tokio::test]
    async fn test_connect_probes_dimensions() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/embeddings")
            .with_status(200)
            .with_body(json!({"data": [{"embedding": [0.0, 1.0, 0.0, 0.0]}]}).to_string())
            .create_async()
            .await;

        let service =
            OpenAiEmbeddingService::connect(&config(&server.url()), Duration::from_secs(5))
                .await
                .unwrap();

        assert_eq!(service.dimensions(), Some(4));
        assert_eq!(service.model_name(), "all-minilm");
    }

    #[tokio::test]
    async fn test_api_error_is_model_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/embeddings")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let service =
            OpenAiEmbeddingService::new(&config(&server.url()), Duration::from_secs(5)).unwrap();
        let err = service.embed("text").await.unwrap_err();

        assert!(matches!(err, DomainError::Model(_)));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_empty_data_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/embeddings")
            .with_status(200)
            .with_body(json!({"data": []}).to_string())
            .create_async()
            .await;

        let service =
            OpenAiEmbeddingService::new(&config(&server.url()), Duration::from_secs(5)).unwrap();
        assert!(service.embed("text").await.is_err());
    }
}
