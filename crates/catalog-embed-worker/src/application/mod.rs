//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the product repository and the embedding model.

mod reindex_service;

pub use reindex_service::{ReindexService, RunSummary};
