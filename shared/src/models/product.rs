//! Product snapshot model

use serde::{Deserialize, Serialize};

/// Catalog product snapshot as consumed by the client.
///
/// Display metadata (`title`, `thumbnail`, `brand`) and `price`/`stock` are
/// copied at lookup time; they are not live references into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSnapshot {
    pub id: String,
    pub title: String,
    /// Unit price at snapshot time.
    pub price: f64,
    /// Available stock at snapshot time.
    pub stock: i64,
    pub thumbnail: String,
    #[serde(default)]
    pub brand: Option<String>,
}
