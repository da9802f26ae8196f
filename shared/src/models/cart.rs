//! Cart line model

use serde::{Deserialize, Serialize};

use super::ProductSnapshot;

/// One product entry in a cart.
///
/// At most one line exists per product `id` within a cart; adding the same
/// product again accumulates `quantity` instead of duplicating the line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product ID.
    pub id: String,
    /// Product name snapshot.
    pub title: String,
    /// Thumbnail URL snapshot.
    pub thumbnail: String,
    /// Brand name snapshot.
    #[serde(default)]
    pub brand: Option<String>,
    /// Unit price at the time the line was added.
    pub price: f64,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Build a line from a catalog snapshot with the given quantity.
    pub fn from_product(product: &ProductSnapshot, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            thumbnail: product.thumbnail.clone(),
            brand: product.brand.clone(),
            price: product.price,
            quantity,
        }
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
