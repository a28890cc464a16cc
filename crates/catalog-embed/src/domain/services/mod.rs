//! Domain Services
//!
//! Stateless transformations from raw product rows to embedding input text.

pub mod normalizer;
mod synthesizer;

pub use normalizer::NormalizedProduct;
pub use synthesizer::DescriptionSynthesizer;
