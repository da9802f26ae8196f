//! Session identity
//!
//! The storefront runs either anonymously ("guest") or as an authenticated
//! user. Persisted client state (cart, wishlist) is keyed per identity so a
//! login does not clobber the anonymous state and vice versa.

use serde::{Deserialize, Serialize};

/// The current session identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Identity {
    /// Anonymous session, no credential.
    #[default]
    Guest,
    /// Authenticated user, carrying the backend user id.
    User(String),
}

impl Identity {
    /// Storage key for this identity's cart: `cart_guest` or `cart_user_<id>`.
    pub fn cart_key(&self) -> String {
        match self {
            Identity::Guest => "cart_guest".to_string(),
            Identity::User(id) => format!("cart_user_{}", id),
        }
    }

    /// Storage key for this identity's wishlist.
    pub fn wishlist_key(&self) -> String {
        match self {
            Identity::Guest => "wishlist_guest".to_string(),
            Identity::User(id) => format!("wishlist_user_{}", id),
        }
    }

    /// Whether this identity is an authenticated user.
    pub fn is_user(&self) -> bool {
        matches!(self, Identity::User(_))
    }
}
