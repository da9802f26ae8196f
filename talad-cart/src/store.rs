//! CartStore - identity-scoped shopping cart
//!
//! The authoritative in-memory cart for the current identity, mirrored to
//! the local store after every mutation of the line list. Persistence is
//! gated behind an `initialized` flag set by [`CartStore::load`] so that a
//! premature empty-state save cannot clobber a previously persisted cart.

use std::collections::HashSet;

use shared::collab::AuthSource;
use shared::models::{CartLine, ProductSnapshot};
use shared::Identity;

use crate::storage::LocalStore;

/// Identity-scoped cart with a selection subset for partial checkout.
pub struct CartStore<S: LocalStore> {
    storage: S,
    identity: Identity,
    lines: Vec<CartLine>,
    selection: HashSet<String>,
    /// Line id awaiting removal confirmation, if any.
    pending_removal: Option<String>,
    /// Set once `load` has completed for the current identity.
    initialized: bool,
}

impl<S: LocalStore> CartStore<S> {
    /// Create an empty, uninitialized store. Call [`CartStore::load`] before
    /// mutating; mutations before then are held in memory but not persisted.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            identity: Identity::Guest,
            lines: Vec::new(),
            selection: HashSet::new(),
            pending_removal: None,
            initialized: false,
        }
    }

    /// Load the persisted cart for `identity`.
    ///
    /// When `identity` is an authenticated user, any guest cart left behind
    /// by the anonymous session is merged in (same-id quantities summed,
    /// user lines first, guest-only lines appended), the guest key is
    /// deleted, and the merged result is persisted under the user key before
    /// this returns. The guest key is taken atomically, so a second session
    /// racing on the same login sees no guest cart and merges nothing.
    pub fn load(&mut self, identity: Identity) {
        self.initialized = false;
        self.selection.clear();
        self.pending_removal = None;

        let mut lines = self.read_lines(&identity.cart_key());

        if identity.is_user() {
            let guest_lines = self.take_lines(&Identity::Guest.cart_key());
            if !guest_lines.is_empty() {
                merge_lines(&mut lines, guest_lines);
                tracing::debug!(count = lines.len(), "Merged guest cart into user cart");
                self.identity = identity.clone();
                self.lines = lines;
                self.initialized = true;
                self.persist();
                return;
            }
        }

        self.identity = identity;
        self.lines = lines;
        self.initialized = true;
    }

    /// Load for whatever identity the auth collaborator currently reports.
    pub fn load_from(&mut self, auth: &dyn AuthSource) {
        self.load(auth.identity());
    }

    /// Add `quantity` of a product. An existing line for the same product id
    /// accumulates; otherwise a new line is appended. No client-side stock
    /// ceiling is enforced; checkout validates stock against the backend.
    pub fn add_line(&mut self, product: &ProductSnapshot, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.id == product.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine::from_product(product, quantity)),
        }
        self.persist();
    }

    /// Record a removal request for `id`, pending confirmation.
    /// Returns `false` (and records nothing) if no such line exists.
    pub fn request_remove(&mut self, id: &str) -> bool {
        if self.lines.iter().any(|l| l.id == id) {
            self.pending_removal = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Confirm the pending removal: the line is deleted and its id dropped
    /// from the selection. No-op when nothing is pending.
    pub fn confirm_remove(&mut self) {
        let Some(id) = self.pending_removal.take() else {
            return;
        };
        self.lines.retain(|l| l.id != id);
        self.selection.remove(&id);
        self.persist();
    }

    /// Abort the pending removal.
    pub fn cancel_remove(&mut self) {
        self.pending_removal = None;
    }

    /// The line id currently awaiting removal confirmation.
    pub fn pending_removal(&self) -> Option<&str> {
        self.pending_removal.as_deref()
    }

    /// Replace a line's quantity exactly. No-op when `quantity < 1` or the
    /// line does not exist.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity < 1 {
            return;
        }
        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return;
        };
        line.quantity = quantity;
        self.persist();
    }

    /// Empty the cart and delete the persisted key immediately.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.selection.clear();
        self.pending_removal = None;
        let key = self.identity.cart_key();
        if let Err(e) = self.storage.remove(&key) {
            tracing::warn!(key = %key, error = %e, "Failed to delete persisted cart");
        }
    }

    /// Toggle a line id in or out of the checkout selection.
    /// Ids without a matching line are ignored.
    pub fn toggle_selection(&mut self, id: &str) {
        if !self.lines.iter().any(|l| l.id == id) {
            return;
        }
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
    }

    /// Toggle between "all line ids selected" and "nothing selected".
    pub fn select_all(&mut self) {
        if self.selection.len() == self.lines.len() && !self.lines.is_empty() {
            self.selection.clear();
        } else {
            self.selection = self.lines.iter().map(|l| l.id.clone()).collect();
        }
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of `price * quantity` over selected lines only.
    pub fn selected_total(&self) -> f64 {
        self.lines
            .iter()
            .filter(|l| self.selection.contains(&l.id))
            .map(|l| l.line_total())
            .sum()
    }

    /// Cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Currently selected line ids.
    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    /// The identity this store is loaded for.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Whether the initial load has completed for the current identity.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ==================== persistence ====================

    fn read_lines(&self, key: &str) -> Vec<CartLine> {
        match self.storage.read(key) {
            Ok(Some(raw)) => parse_lines(key, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cart read failed, starting empty");
                Vec::new()
            }
        }
    }

    fn take_lines(&mut self, key: &str) -> Vec<CartLine> {
        match self.storage.take(key) {
            Ok(Some(raw)) => parse_lines(key, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Guest cart take failed, skipping merge");
                Vec::new()
            }
        }
    }

    fn persist(&mut self) {
        if !self.initialized {
            return;
        }
        let key = self.identity.cart_key();
        let raw = match serde_json::to_string(&self.lines) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cart serialization failed");
                return;
            }
        };
        if let Err(e) = self.storage.write(&key, &raw) {
            tracing::warn!(key = %key, error = %e, "Cart write failed");
        }
    }
}

/// Merge guest lines into user lines: same-id quantities are summed onto the
/// existing user line, guest-only lines are appended in guest order.
fn merge_lines(user: &mut Vec<CartLine>, guest: Vec<CartLine>) {
    for guest_line in guest {
        match user.iter_mut().find(|l| l.id == guest_line.id) {
            Some(line) => line.quantity += guest_line.quantity,
            None => user.push(guest_line),
        }
    }
}

/// Parse persisted lines; corrupt data degrades to an empty cart.
fn parse_lines(key: &str, raw: &str) -> Vec<CartLine> {
    match serde_json::from_str(raw) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Corrupt persisted cart, starting empty");
            Vec::new()
        }
    }
}
