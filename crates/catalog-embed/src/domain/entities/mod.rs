//! Domain Entities
//!
//! - Product: catalog row with its joined seller reference

mod product;

pub use product::*;
