//! WishlistStore - identity-scoped wishlist
//!
//! Same persistence idiom as the cart: a per-identity key holding a JSON
//! array, the guest list folded into the user list on login. The value is
//! just an ordered set of product ids.

use shared::Identity;

use crate::storage::LocalStore;

/// Identity-scoped set of wishlisted product ids, insertion-ordered.
pub struct WishlistStore<S: LocalStore> {
    storage: S,
    identity: Identity,
    ids: Vec<String>,
    initialized: bool,
}

impl<S: LocalStore> WishlistStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            identity: Identity::Guest,
            ids: Vec::new(),
            initialized: false,
        }
    }

    /// Load the persisted wishlist for `identity`. On login the guest list
    /// is unioned into the user list (guest-only ids appended) and the
    /// guest key deleted, mirroring the cart merge.
    pub fn load(&mut self, identity: Identity) {
        self.initialized = false;

        let mut ids = self.read_ids(&identity.wishlist_key());

        if identity.is_user() {
            let guest_ids = match self.storage.take(&Identity::Guest.wishlist_key()) {
                Ok(Some(raw)) => parse_ids(&raw),
                Ok(None) => Vec::new(),
                Err(e) => {
                    tracing::warn!(error = %e, "Guest wishlist take failed, skipping merge");
                    Vec::new()
                }
            };
            if !guest_ids.is_empty() {
                for id in guest_ids {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                self.identity = identity;
                self.ids = ids;
                self.initialized = true;
                self.persist();
                return;
            }
        }

        self.identity = identity;
        self.ids = ids;
        self.initialized = true;
    }

    /// Toggle membership of `id`; returns the new membership state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let added = if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        };
        self.persist();
        added
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    /// Empty the wishlist and delete the persisted key.
    pub fn clear(&mut self) {
        self.ids.clear();
        let key = self.identity.wishlist_key();
        if let Err(e) = self.storage.remove(&key) {
            tracing::warn!(key = %key, error = %e, "Failed to delete persisted wishlist");
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn read_ids(&self, key: &str) -> Vec<String> {
        match self.storage.read(key) {
            Ok(Some(raw)) => parse_ids(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Wishlist read failed, starting empty");
                Vec::new()
            }
        }
    }

    fn persist(&mut self) {
        if !self.initialized {
            return;
        }
        let key = self.identity.wishlist_key();
        let raw = match serde_json::to_string(&self.ids) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Wishlist serialization failed");
                return;
            }
        };
        if let Err(e) = self.storage.write(&key, &raw) {
            tracing::warn!(key = %key, error = %e, "Wishlist write failed");
        }
    }
}

fn parse_ids(raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(error = %e, "Corrupt persisted wishlist, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryLocalStore;

    #[test]
    fn test_toggle_round_trip() {
        let mut store = WishlistStore::new(MemoryLocalStore::new());
        store.load(Identity::Guest);

        assert!(store.toggle("p1"));
        assert!(store.contains("p1"));
        assert!(!store.toggle("p1"));
        assert!(!store.contains("p1"));
        assert!(store.ids().is_empty());
    }

    #[test]
    fn test_guest_list_unions_into_user_list() {
        let mut storage = MemoryLocalStore::new();
        storage.seed("wishlist_guest", r#"["p1","p3"]"#);
        storage.seed("wishlist_user_7", r#"["p1","p2"]"#);

        let mut store = WishlistStore::new(storage);
        store.load(Identity::User("7".to_string()));

        assert_eq!(store.ids(), ["p1", "p2", "p3"]);
        assert!(!store.storage.contains_key("wishlist_guest"));

        // Re-loading with no new guest activity changes nothing.
        store.load(Identity::User("7".to_string()));
        assert_eq!(store.ids(), ["p1", "p2", "p3"]);
    }

    #[test]
    fn test_clear_deletes_key() {
        let mut store = WishlistStore::new(MemoryLocalStore::new());
        store.load(Identity::Guest);
        store.toggle("p1");
        assert!(store.storage.contains_key("wishlist_guest"));

        store.clear();
        assert!(!store.storage.contains_key("wishlist_guest"));
        assert!(store.ids().is_empty());
    }
}
