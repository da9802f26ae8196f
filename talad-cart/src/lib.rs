//! Talad Cart - identity-scoped cart and wishlist state
//!
//! Owns the in-memory shopping cart for the current session identity and
//! mirrors it to a durable local key-value store after every mutation.
//! On login the anonymous ("guest") cart is merged into the user cart and
//! the guest key is deleted. The wishlist follows the same persistence
//! idiom with a smaller surface.

pub mod storage;
pub mod store;
pub mod wishlist;

pub use storage::{FileLocalStore, LocalStore, MemoryLocalStore, StoreError, StoreResult};
pub use store::CartStore;
pub use wishlist::WishlistStore;
