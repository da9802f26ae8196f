//! Flash-sale campaign wire shapes
//!
//! These are the submission-side shapes handed to the campaign service.
//! The editable draft itself lives in `talad-flash`; on submit it is
//! serialized into a [`CampaignPayload`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Discount mode for tag-based bulk pricing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountMode {
    /// `sale_price = original_price * (1 - value/100)`
    Percentage,
    /// `sale_price = value`
    FixedAmount,
}

/// One product entry in a submitted campaign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlashSaleProduct {
    pub product_id: String,
    /// Product name snapshot at selection time.
    pub product_name: String,
    /// Product image URL snapshot at selection time.
    pub product_image: String,
    /// Reference price, immutable within the entry.
    pub original_price: f64,
    /// Discounted price, `0 <= sale_price < original_price`.
    pub sale_price: f64,
    /// Per-product quota, `0 <= limit <= stock`.
    pub limit: i64,
    /// Catalog stock snapshot at selection time; upper bound for `limit`.
    pub stock: i64,
}

/// Submission payload for campaign create/update.
///
/// Sent as a multipart form: `banner_image` as a binary part, `products` and
/// `conditions_text` JSON-encoded, booleans as strings. Field names match the
/// campaign service contract one to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignPayload {
    pub name: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_active: bool,
    pub show_in_hero: bool,
    pub enable_notification: bool,
    pub is_member_only: bool,
    pub can_use_coupon: bool,
    pub no_cod: bool,
    pub priority: i32,
    /// Associates the draft with a parent campaign, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    /// Raw banner image bytes; uploaded as a binary multipart part.
    #[serde(skip)]
    pub banner_image: Option<BannerImage>,
    pub bg_color: String,
    pub text_color: String,
    pub conditions_text: Vec<String>,
    pub products: Vec<FlashSaleProduct>,
}

/// Banner image attachment for a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Stored campaign record as returned by the campaign service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_active: bool,
    pub show_in_hero: bool,
    pub enable_notification: bool,
    pub is_member_only: bool,
    pub can_use_coupon: bool,
    pub no_cod: bool,
    pub priority: i32,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub banner_url: Option<String>,
    pub bg_color: String,
    pub text_color: String,
    #[serde(default)]
    pub conditions_text: Vec<String>,
    pub products: Vec<FlashSaleProduct>,
}
