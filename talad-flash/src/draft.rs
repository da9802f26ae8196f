//! Flash-sale draft state
//!
//! The in-memory, not-yet-submitted campaign record being edited. Rows keep
//! their numeric fields as `Option`s: `None` is the transient empty-input
//! state while the operator is typing, and the final validation gate
//! rejects a draft that still carries one.

use chrono::NaiveDateTime;
use shared::models::{
    BannerImage, CampaignPayload, CampaignRecord, FlashSaleProduct, ProductSnapshot,
};

use crate::editor::RowField;
use crate::error::DraftError;
use crate::schedule::Schedule;

/// One product's pricing/quota entry within a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashSaleProductRow {
    pub product_id: String,
    pub product_name: String,
    pub product_image: String,
    /// Reference price, immutable within the row.
    pub original_price: f64,
    /// Catalog stock snapshot at selection time; upper bound for `limit`.
    pub stock: i64,
    /// `None` while the input is empty; clamped to `[0, original_price - 1]`.
    pub sale_price: Option<f64>,
    /// `None` while the input is empty; clamped to `[0, stock]`.
    pub limit: Option<i64>,
}

impl FlashSaleProductRow {
    /// New row defaults: no discount, full quota.
    pub fn from_snapshot(product: &ProductSnapshot) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.title.clone(),
            product_image: product.thumbnail.clone(),
            original_price: product.price,
            stock: product.stock,
            sale_price: Some(product.price),
            limit: Some(product.stock),
        }
    }

    fn from_record_product(p: &FlashSaleProduct) -> Self {
        Self {
            product_id: p.product_id.clone(),
            product_name: p.product_name.clone(),
            product_image: p.product_image.clone(),
            original_price: p.original_price,
            stock: p.stock,
            sale_price: Some(p.sale_price),
            limit: Some(p.limit),
        }
    }

    fn to_payload_product(&self, index: usize) -> Result<FlashSaleProduct, DraftError> {
        let sale_price = self.sale_price.ok_or(DraftError::PendingField {
            index,
            field: RowField::SalePrice,
        })?;
        let limit = self.limit.ok_or(DraftError::PendingField {
            index,
            field: RowField::Limit,
        })?;
        Ok(FlashSaleProduct {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            product_image: self.product_image.clone(),
            original_price: self.original_price,
            sale_price,
            limit,
            stock: self.stock,
        })
    }
}

/// The campaign draft under edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FlashSaleDraft {
    pub name: String,
    pub description: String,
    pub schedule: Schedule,
    pub products: Vec<FlashSaleProductRow>,
    pub is_active: bool,
    pub show_in_hero: bool,
    pub enable_notification: bool,
    pub is_member_only: bool,
    pub can_use_coupon: bool,
    pub no_cod: bool,
    pub priority: i32,
    pub campaign_id: Option<String>,
    pub banner_image: Option<BannerImage>,
    pub bg_color: String,
    pub text_color: String,
    pub conditions_text: Vec<String>,
}

impl FlashSaleDraft {
    /// Fresh draft for "create": starts now, runs 24 hours, active.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            schedule: Schedule::starting_now(now),
            products: Vec::new(),
            is_active: true,
            show_in_hero: false,
            enable_notification: false,
            is_member_only: false,
            can_use_coupon: false,
            no_cod: false,
            priority: 0,
            campaign_id: None,
            banner_image: None,
            bg_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            conditions_text: Vec::new(),
        }
    }

    /// Draft populated from an existing record for "edit".
    pub fn from_record(record: &CampaignRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            schedule: Schedule::from_range(record.start_time, record.end_time),
            products: record
                .products
                .iter()
                .map(FlashSaleProductRow::from_record_product)
                .collect(),
            is_active: record.is_active,
            show_in_hero: record.show_in_hero,
            enable_notification: record.enable_notification,
            is_member_only: record.is_member_only,
            can_use_coupon: record.can_use_coupon,
            no_cod: record.no_cod,
            priority: record.priority,
            campaign_id: record.campaign_id.clone(),
            banner_image: None,
            bg_color: record.bg_color.clone(),
            text_color: record.text_color.clone(),
            conditions_text: record.conditions_text.clone(),
        }
    }

    /// Final gate before submission. Clamping happens eagerly on edit, so
    /// this normally only catches empty drafts and still-empty inputs.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.products.is_empty() {
            return Err(DraftError::NoProducts);
        }
        if self.schedule.end() <= self.schedule.start() {
            return Err(DraftError::InvalidDateRange);
        }
        for (index, row) in self.products.iter().enumerate() {
            if row.sale_price.is_none() {
                return Err(DraftError::PendingField {
                    index,
                    field: RowField::SalePrice,
                });
            }
            if row.limit.is_none() {
                return Err(DraftError::PendingField {
                    index,
                    field: RowField::Limit,
                });
            }
        }
        Ok(())
    }

    /// Validate and serialize into the submission payload.
    pub fn to_payload(&self) -> Result<CampaignPayload, DraftError> {
        self.validate()?;
        let products = self
            .products
            .iter()
            .enumerate()
            .map(|(i, row)| row.to_payload_product(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CampaignPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            start_time: self.schedule.start(),
            end_time: self.schedule.end(),
            is_active: self.is_active,
            show_in_hero: self.show_in_hero,
            enable_notification: self.enable_notification,
            is_member_only: self.is_member_only,
            can_use_coupon: self.can_use_coupon,
            no_cod: self.no_cod,
            priority: self.priority,
            campaign_id: self.campaign_id.clone(),
            banner_image: self.banner_image.clone(),
            bg_color: self.bg_color.clone(),
            text_color: self.text_color.clone(),
            conditions_text: self.conditions_text.clone(),
            products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn snapshot(id: &str, price: f64, stock: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            title: format!("Product {}", id),
            price,
            stock,
            thumbnail: format!("https://img.example/{}.jpg", id),
            brand: None,
        }
    }

    #[test]
    fn test_row_defaults_full_quota_no_discount() {
        let row = FlashSaleProductRow::from_snapshot(&snapshot("p1", 199.0, 40));
        assert_eq!(row.sale_price, Some(199.0));
        assert_eq!(row.limit, Some(40));
        assert_eq!(row.stock, 40);
    }

    #[test]
    fn test_validate_rejects_empty_products() {
        let draft = FlashSaleDraft::new(now());
        assert_eq!(draft.validate(), Err(DraftError::NoProducts));
    }

    #[test]
    fn test_validate_rejects_pending_fields() {
        let mut draft = FlashSaleDraft::new(now());
        draft
            .products
            .push(FlashSaleProductRow::from_snapshot(&snapshot("p1", 100.0, 10)));
        draft.products[0].limit = None;

        assert_eq!(
            draft.validate(),
            Err(DraftError::PendingField {
                index: 0,
                field: RowField::Limit
            })
        );
    }

    #[test]
    fn test_payload_carries_rows() {
        let mut draft = FlashSaleDraft::new(now());
        draft.name = "Mid-month sale".to_string();
        draft
            .products
            .push(FlashSaleProductRow::from_snapshot(&snapshot("p1", 100.0, 10)));
        draft.products[0].sale_price = Some(79.0);

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.products.len(), 1);
        assert_eq!(payload.products[0].sale_price, 79.0);
        assert_eq!(payload.products[0].limit, 10);
        assert_eq!(payload.start_time, draft.schedule.start());
    }
}
