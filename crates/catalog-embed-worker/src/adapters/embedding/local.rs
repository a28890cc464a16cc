//! Embedding Service - in-process all-MiniLM-L6-v2 via fastembed
//!
//! `TextEmbedding` is synchronous and CPU-bound, so both model loading and
//! inference run on the blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use catalog_embed::{DomainError, EmbeddingService};

/// all-MiniLM-L6-v2 output size
const MINILM_DIMENSIONS: usize = 384;

pub struct LocalEmbeddingService {
    model: Arc<TextEmbedding>,
    model_name: String,
}

impl LocalEmbeddingService {
    /// Load the model once; downloads it into the fastembed cache on first run
    pub async fn load(model_name: &str) -> Result<Self, DomainError> {
        if model_name != "all-MiniLM-L6-v2" {
            return Err(DomainError::Model(format!(
                "Local provider only ships all-MiniLM-L6-v2, not {}",
                model_name
            )));
        }

        let model = tokio::task::spawn_blocking(|| {
            TextEmbedding::try_new(
                InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(true),
            )
        })
        .await
        .map_err(|e| DomainError::Model(format!("Model loading task failed: {e}")))?
        .map_err(|e| DomainError::Model(format!("Failed to load {}: {e}", model_name)))?;

        Ok(Self {
            model: Arc::new(model),
            model_name: model_name.to_string(),
        })
    }
}

#[async_trait]
impl EmbeddingService for LocalEmbeddingService {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let model = Arc::clone(&self.model);
        let input = vec![text.to_string()];

        let mut vectors = tokio::task::spawn_blocking(move || model.embed(input, None))
            .await
            .map_err(|e| DomainError::Model(format!("Inference task failed: {e}")))?
            .map_err(|e| DomainError::Model(format!("Inference failed: {e}")))?;

        vectors
            .pop()
            .ok_or_else(|| DomainError::Model("No embedding returned".to_string()))
    }

    fn dimensions(&self) -> Option<usize> {
        Some(MINILM_DIMENSIONS)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
