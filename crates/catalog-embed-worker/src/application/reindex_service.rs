//! Reindex Application Service (Use Case)
//!
//! Regenerates the embedding of every product in the catalog:
//! 1. Fetch all products with their joined seller
//! 2. Normalize fields and synthesize a description per product
//! 3. Encode the description and write the vector back to the same row
//! 4. Report a summary once every product has been attempted
//!
//! A failure while processing one product is logged and recorded, and the
//! run moves on to the next product.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use catalog_embed::domain::services::normalizer::text_field;
use catalog_embed::{
    DescriptionSynthesizer, DomainError, EmbeddingService, NormalizedProduct, PriceSegment,
    ProductId, ProductRecord, ProductRepository, SellerJoin,
};

use crate::config::RetryConfig;

/// A product that could not be updated
#[derive(Debug, Clone)]
pub struct RecordFailure {
    /// Position in fetch order
    pub position: usize,
    /// Identifier, when the row carried a usable one
    pub id: Option<String>,
    pub name: String,
    pub error: String,
}

impl RecordFailure {
    /// Identifier for diagnostics, falling back to the fetch position
    pub fn label(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("#{}", self.position + 1))
    }
}

/// Outcome of one full run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub table: String,
    pub total: usize,
    pub updated: usize,
    pub failures: Vec<RecordFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Application service driving the batch update
pub struct ReindexService<R, E>
where
    R: ProductRepository + ?Sized,
    E: EmbeddingService + ?Sized,
{
    repo: Arc<R>,
    embedder: Arc<E>,
    synthesizer: DescriptionSynthesizer,
    seller: SellerJoin,
    retry: RetryConfig,
}

impl<R, E> ReindexService<R, E>
where
    R: ProductRepository + ?Sized,
    E: EmbeddingService + ?Sized,
{
    pub fn new(
        repo: Arc<R>,
        embedder: Arc<E>,
        synthesizer: DescriptionSynthesizer,
        seller: SellerJoin,
        retry: RetryConfig,
    ) -> Self {
        Self {
            repo,
            embedder,
            synthesizer,
            seller,
            retry,
        }
    }

    /// Build the embedding input text for one product
    pub fn describe(&self, record: &ProductRecord) -> (NormalizedProduct, String) {
        let normalized = NormalizedProduct::from_record(record, &self.seller);
        let segment = PriceSegment::from_price(record.price.as_ref());
        let text = self.synthesizer.synthesize(&normalized, segment);
        (normalized, text)
    }

    /// Regenerate every product's embedding.
    ///
    /// Returns `Err` only when nothing could be processed: the fetch failed or
    /// the catalog is empty. Per-product failures are collected in the summary.
    pub async fn run(&self) -> Result<RunSummary, DomainError> {
        let started_at = Utc::now();
        let table = self.repo.table().to_string();

        let products = self.repo.fetch_all().await?;
        if products.is_empty() {
            return Err(DomainError::EmptyCatalog { table });
        }

        let total = products.len();
        tracing::info!("🔄 Found {} products. Generating embeddings...", total);

        let mut expected_dims = self.embedder.dimensions();
        let mut updated = 0;
        let mut failures = Vec::new();

        for (position, record) in products.iter().enumerate() {
            match self.process(record, &mut expected_dims).await {
                Ok(()) => updated += 1,
                Err(e) => {
                    let failure = RecordFailure {
                        position,
                        id: record.product_id().ok().map(|id| id.to_string()),
                        name: text_field(record.name.as_ref()),
                        error: e.to_string(),
                    };
                    tracing::warn!(
                        position = position + 1,
                        "[{}] {} ({}): {}",
                        e.category(),
                        failure.label(),
                        failure.name,
                        failure.error
                    );
                    failures.push(failure);
                }
            }
        }

        let summary = RunSummary {
            table,
            total,
            updated,
            failures,
            started_at,
            finished_at: Utc::now(),
        };

        let elapsed = summary.finished_at - summary.started_at;
        if summary.is_success() {
            tracing::info!(
                elapsed_ms = elapsed.num_milliseconds(),
                "🎉 Done! {} product embeddings updated in {}",
                summary.updated,
                summary.table
            );
        } else {
            tracing::error!(
                elapsed_ms = elapsed.num_milliseconds(),
                "❌ Finished with errors: {} updated, {} failed of {}",
                summary.updated,
                summary.failures.len(),
                summary.total
            );
        }

        Ok(summary)
    }

    async fn process(
        &self,
        record: &ProductRecord,
        expected_dims: &mut Option<usize>,
    ) -> Result<(), DomainError> {
        let (normalized, text) = self.describe(record);
        let id = record.product_id()?;

        let mut delay = self.retry.base_delay_ms.min(self.retry.max_delay_ms);
        let mut attempt = 0;
        loop {
            match self.encode_and_store(&id, &text, expected_dims).await {
                Ok(()) => break,
                Err(e) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    tracing::debug!(%id, attempt, "🔁 Retrying after error: {}", e);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    delay = delay.saturating_mul(2).min(self.retry.max_delay_ms);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            %id,
            "✨ Updated: {} (Brand: {})",
            normalized.name,
            normalized.brand
        );
        Ok(())
    }

    async fn encode_and_store(
        &self,
        id: &ProductId,
        text: &str,
        expected_dims: &mut Option<usize>,
    ) -> Result<(), DomainError> {
        let vector = self.embedder.embed(text).await?;

        let declared = *expected_dims;
        match declared {
            _ if vector.is_empty() => {
                return Err(DomainError::Model("Model returned an empty vector".to_string()));
            }
            Some(dims) if dims != vector.len() => {
                return Err(DomainError::Model(format!(
                    "Vector has {} dimensions, expected {}",
                    vector.len(),
                    dims
                )));
            }
            Some(_) => {}
            None => *expected_dims = Some(vector.len()),
        }

        self.repo.update_embedding(id, &vector).await
    }
}
