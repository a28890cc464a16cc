//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod embedding;
pub mod supabase;

// Re-exports
#[cfg(feature = "local")]
pub use embedding::LocalEmbeddingService;
pub use embedding::OpenAiEmbeddingService;
pub use supabase::SupabaseProductRepository;
