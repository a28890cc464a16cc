//! Product Repository Port
//!
//! Abstract interface for reading the catalog and writing embeddings back.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, ProductId, ProductRecord};

/// Repository interface for catalog products
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch every product with its joined seller reference, in store order
    async fn fetch_all(&self) -> Result<Vec<ProductRecord>, DomainError>;

    /// Overwrite the embedding of exactly one product
    async fn update_embedding(&self, id: &ProductId, embedding: &[f32]) -> Result<(), DomainError>;

    /// Table name, used in diagnostics
    fn table(&self) -> &str;
}
