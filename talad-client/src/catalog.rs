//! Catalog API - tag-based product lookup

use async_trait::async_trait;
use shared::collab::{CatalogLookup, CollabResult};
use shared::models::{ProductSnapshot, Tag};

use crate::{ApiResponse, ClientResult, HttpClient};

impl HttpClient {
    /// List the active catalog tags. Populates the tag picker the bulk-add
    /// flow selects from.
    pub async fn list_tags(&self) -> ClientResult<Vec<Tag>> {
        let response: ApiResponse<Vec<Tag>> = self.get("/api/catalog/tags").await?;
        let mut tags = Self::unwrap_data(response, "tag")?;
        tags.retain(|t| t.is_active);
        Ok(tags)
    }

    /// Resolve all products carrying any of the given tag ids.
    pub async fn products_by_tags(&self, tag_ids: &[String]) -> ClientResult<Vec<ProductSnapshot>> {
        let tags = tag_ids.join(",");
        let response: ApiResponse<Vec<ProductSnapshot>> = self
            .get(&format!("/api/catalog/products?tags={}", tags))
            .await?;
        Self::unwrap_data(response, "product")
    }
}

#[async_trait]
impl CatalogLookup for HttpClient {
    async fn products_by_tags(&self, tag_ids: &[String]) -> CollabResult<Vec<ProductSnapshot>> {
        HttpClient::products_by_tags(self, tag_ids)
            .await
            .map_err(Into::into)
    }
}
