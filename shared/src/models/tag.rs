//! Tag model

use serde::{Deserialize, Serialize};

/// Catalog tag entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub is_active: bool,
}
