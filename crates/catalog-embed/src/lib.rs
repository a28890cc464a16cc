//! Catalog Embed Domain Library
//!
//! Core domain types and interfaces for regenerating product embeddings.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Raw product rows as the data store returns them
//!   - `value_objects/`: Immutable value types (PriceSegment, DescriptionLocale)
//!   - `services/`: Field normalization and description synthesis
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Product catalog access
//!   - `services/`: Embedding model interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use catalog_embed::{DescriptionSynthesizer, NormalizedProduct, PriceSegment};
//!
//! let normalized = NormalizedProduct::from_record(&record, &SellerJoin::default());
//! let segment = PriceSegment::from_price(record.price.as_ref());
//! let text = DescriptionSynthesizer::default().synthesize(&normalized, segment);
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DescriptionLocale, DescriptionSynthesizer, DomainError, ErrorCategory, NormalizedProduct,
    PriceSegment, ProductId, ProductRecord, SellerJoin,
};
pub use ports::{EmbeddingService, ProductRepository};
