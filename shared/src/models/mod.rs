//! Data models
//!
//! Shared between the storefront state containers and the HTTP client.
//! All product IDs are opaque `String` keys, stable across sessions.

pub mod cart;
pub mod flash_sale;
pub mod product;
pub mod tag;

// Re-exports
pub use cart::*;
pub use flash_sale::*;
pub use product::*;
pub use tag::*;
