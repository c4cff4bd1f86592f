//! Products domain module.
//!
//! The `Product` entity and the code sequence that names it. Pure domain
//! logic (no IO, no logging).

pub mod code;
pub mod product;

pub use code::{CodeSequence, DEFAULT_CODE_PREFIX, DEFAULT_CODE_WIDTH, ProductCode};
pub use product::{Product, ProductDraft, ProductRow};
