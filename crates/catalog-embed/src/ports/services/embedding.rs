//! Embedding Service Port
//!
//! Abstract interface for text embedding generation.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Service interface for generating text embeddings
///
/// Implementations load their model once at construction and are expected to
/// be deterministic for a fixed model and input.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generate embedding vector for text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Vector length, when the model declares it up front
    fn dimensions(&self) -> Option<usize>;

    /// Model identifier for logging
    fn model_name(&self) -> &str;
}
