//! Embedding model adapters

#[cfg(feature = "local")]
mod local;
mod openai;

#[cfg(feature = "local")]
pub use local::LocalEmbeddingService;
pub use openai::OpenAiEmbeddingService;
