//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod locale;
mod price_segment;

pub use locale::*;
pub use price_segment::*;
