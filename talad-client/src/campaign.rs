//! Campaign API - flash-sale submission
//!
//! The campaign service accepts a multipart form: scalar fields as strings,
//! `conditions_text` and `products` JSON-encoded, and the banner image as a
//! binary part.

use async_trait::async_trait;
use shared::collab::{CampaignService, CollabResult};
use shared::models::{CampaignPayload, CampaignRecord};

use crate::{ApiResponse, ClientResult, HttpClient};

/// ISO-8601 rendering used for the time fields.
fn iso(dt: chrono::NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Text fields of the multipart form, in submission order.
///
/// Split out from the form construction so the field encoding is testable
/// without a network stack.
pub fn campaign_text_fields(payload: &CampaignPayload) -> ClientResult<Vec<(&'static str, String)>> {
    let mut fields = vec![
        ("name", payload.name.clone()),
        ("description", payload.description.clone()),
        ("start_time", iso(payload.start_time)),
        ("end_time", iso(payload.end_time)),
        ("is_active", payload.is_active.to_string()),
        ("show_in_hero", payload.show_in_hero.to_string()),
        ("enable_notification", payload.enable_notification.to_string()),
        ("is_member_only", payload.is_member_only.to_string()),
        ("can_use_coupon", payload.can_use_coupon.to_string()),
        ("no_cod", payload.no_cod.to_string()),
        ("priority", payload.priority.to_string()),
        ("bg_color", payload.bg_color.clone()),
        ("text_color", payload.text_color.clone()),
        ("conditions_text", serde_json::to_string(&payload.conditions_text)?),
        ("products", serde_json::to_string(&payload.products)?),
    ];
    if let Some(campaign_id) = &payload.campaign_id {
        fields.push(("campaign_id", campaign_id.clone()));
    }
    Ok(fields)
}

fn build_form(payload: &CampaignPayload) -> ClientResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in campaign_text_fields(payload)? {
        form = form.text(name, value);
    }
    if let Some(banner) = &payload.banner_image {
        let mime = mime_guess::from_path(&banner.file_name)
            .first_or_octet_stream()
            .to_string();
        let part = reqwest::multipart::Part::bytes(banner.bytes.clone())
            .file_name(banner.file_name.clone())
            .mime_str(&mime)?;
        form = form.part("banner_image", part);
    }
    Ok(form)
}

impl HttpClient {
    /// Create a campaign (POST).
    pub async fn create_campaign(&self, payload: &CampaignPayload) -> ClientResult<CampaignRecord> {
        let form = build_form(payload)?;
        tracing::debug!(name = %payload.name, products = payload.products.len(), "Submitting campaign");
        let response: ApiResponse<CampaignRecord> =
            self.post_multipart("/api/admin/flash-sales", form).await?;
        Self::unwrap_data(response, "campaign")
    }

    /// Update an existing campaign by id (PUT).
    pub async fn update_campaign(
        &self,
        id: &str,
        payload: &CampaignPayload,
    ) -> ClientResult<CampaignRecord> {
        let form = build_form(payload)?;
        tracing::debug!(id = %id, name = %payload.name, "Updating campaign");
        let response: ApiResponse<CampaignRecord> = self
            .put_multipart(&format!("/api/admin/flash-sales/{}", id), form)
            .await?;
        Self::unwrap_data(response, "campaign")
    }
}

#[async_trait]
impl CampaignService for HttpClient {
    async fn create(&self, payload: CampaignPayload) -> CollabResult<CampaignRecord> {
        self.create_campaign(&payload).await.map_err(Into::into)
    }

    async fn update(&self, id: &str, payload: CampaignPayload) -> CollabResult<CampaignRecord> {
        self.update_campaign(id, &payload).await.map_err(Into::into)
    }
}
