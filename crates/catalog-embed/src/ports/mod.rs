//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems (data store, embedding model).
//!
//! Implementations of these traits live in the worker crate.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
