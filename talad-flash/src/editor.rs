//! FlashSaleDraftEditor - campaign draft lifecycle and edit operations
//!
//! Lifecycle: `Unopened -> Editing -> Submitting -> Saved`, with failed
//! submissions dropping back to `Editing` (draft intact, server message
//! recorded) and `Discarded` on modal close. `Saved` and `Discarded` both
//! behave as `Unopened` for the next open.

use chrono::NaiveDateTime;
use shared::collab::{CampaignService, CatalogLookup};
use shared::models::{CampaignRecord, DiscountMode, ProductSnapshot};

use crate::clamp::{clamp, sale_price_max, ClampOutcome, FieldKind};
use crate::draft::{FlashSaleDraft, FlashSaleProductRow};
use crate::error::{DraftError, SubmitError};
use crate::schedule::{ClockUnit, Direction, ScheduleError, TimeField};

/// Editable numeric field of a product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    SalePrice,
    Limit,
}

/// Draft lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Unopened,
    Editing,
    Submitting,
    Saved,
    Discarded,
}

/// Holds one campaign draft and enforces its invariants as the operator edits.
#[derive(Debug, Default)]
pub struct FlashSaleDraftEditor {
    state: EditorState,
    draft: Option<FlashSaleDraft>,
    /// Record id when editing an existing campaign; `None` for create.
    editing_id: Option<String>,
    /// Verbatim server message from the last failed submission.
    last_error: Option<String>,
}

impl FlashSaleDraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == EditorState::Submitting
    }

    /// Server message from the last failed submission, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Open a fresh draft (defaults: start now, end in 24 hours).
    pub fn open_create(&mut self, now: NaiveDateTime) {
        self.draft = Some(FlashSaleDraft::new(now));
        self.editing_id = None;
        self.last_error = None;
        self.state = EditorState::Editing;
    }

    /// Open a draft populated from an existing record; submit becomes an
    /// update of that record.
    pub fn open_edit(&mut self, record: &CampaignRecord) {
        self.draft = Some(FlashSaleDraft::from_record(record));
        self.editing_id = Some(record.id.clone());
        self.last_error = None;
        self.state = EditorState::Editing;
    }

    /// Drop the draft without submitting.
    pub fn discard(&mut self) {
        self.draft = None;
        self.editing_id = None;
        self.state = EditorState::Discarded;
    }

    pub fn draft(&self) -> Option<&FlashSaleDraft> {
        self.draft.as_ref()
    }

    /// Mutable access for free-text fields, flags, colors and conditions.
    /// Date and numeric edits go through the dedicated methods below.
    pub fn draft_mut(&mut self) -> Option<&mut FlashSaleDraft> {
        self.draft.as_mut()
    }

    // ==================== schedule ====================

    pub fn set_start(&mut self, start: NaiveDateTime) {
        if let Some(draft) = self.draft.as_mut() {
            draft.schedule.set_start(start);
        }
    }

    pub fn set_end(&mut self, end: NaiveDateTime) -> Result<(), ScheduleError> {
        let Some(draft) = self.draft.as_mut() else {
            return Ok(());
        };
        draft.schedule.set_end(end)
    }

    pub fn adjust_clock(
        &mut self,
        field: TimeField,
        unit: ClockUnit,
        direction: Direction,
        now: NaiveDateTime,
    ) -> Result<(), ScheduleError> {
        let Some(draft) = self.draft.as_mut() else {
            return Ok(());
        };
        draft.schedule.adjust_clock(field, unit, direction, now)
    }

    // ==================== products ====================

    /// Append a product row with default price/quota. A duplicate product id
    /// leaves the existing row untouched; returns whether a row was added.
    pub fn add_product(&mut self, product: &ProductSnapshot) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        if draft.products.iter().any(|r| r.product_id == product.id) {
            return false;
        }
        draft.products.push(FlashSaleProductRow::from_snapshot(product));
        true
    }

    /// Resolve all products carrying any of `tag_ids` and append a row for
    /// each one not already present, with the bulk discount applied. Existing
    /// rows are never overwritten. Returns the number of rows added.
    pub async fn add_products_by_tag(
        &mut self,
        catalog: &dyn CatalogLookup,
        tag_ids: &[String],
        mode: DiscountMode,
        value: f64,
    ) -> Result<usize, SubmitError> {
        if self.draft.is_none() {
            return Err(DraftError::NotEditing.into());
        }
        let products = catalog.products_by_tags(tag_ids).await?;

        let draft = self.draft.as_mut().ok_or(DraftError::NotEditing)?;
        let mut added = 0;
        for product in &products {
            if draft.products.iter().any(|r| r.product_id == product.id) {
                continue;
            }
            let mut row = FlashSaleProductRow::from_snapshot(product);
            row.sale_price = Some(bulk_sale_price(product.price, mode, value));
            draft.products.push(row);
            added += 1;
        }
        tracing::debug!(added, tags = tag_ids.len(), "Bulk-added tagged products");
        Ok(added)
    }

    /// Sanitize and clamp one row input. Empty input is held as the pending
    /// state rather than coerced to zero. Unknown indexes are ignored.
    pub fn update_row(&mut self, index: usize, field: RowField, raw: &str) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        let Some(row) = draft.products.get_mut(index) else {
            return;
        };
        match field {
            RowField::SalePrice => {
                row.sale_price =
                    match clamp(FieldKind::Price, raw, 0.0, sale_price_max(row.original_price)) {
                        ClampOutcome::Pending => None,
                        ClampOutcome::Value(v) => Some(v),
                    };
            }
            RowField::Limit => {
                row.limit = match clamp(FieldKind::Quota, raw, 0.0, row.stock as f64) {
                    ClampOutcome::Pending => None,
                    ClampOutcome::Value(v) => Some(v as i64),
                };
            }
        }
    }

    /// Delete a row together with its transient input state.
    pub fn remove_row(&mut self, index: usize) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if index < draft.products.len() {
            draft.products.remove(index);
        }
    }

    // ==================== submission ====================

    /// Final validation gate.
    pub fn validate(&self) -> Result<(), DraftError> {
        self.draft
            .as_ref()
            .ok_or(DraftError::NotEditing)?
            .validate()
    }

    /// Validate, serialize and hand the draft to the campaign service.
    ///
    /// On success the editor transitions to `Saved` and the draft is
    /// released. On failure it drops back to `Editing` with the draft intact
    /// for retry and the server message recorded; `AuthRequired` is passed
    /// through distinctly so the caller can redirect to re-authentication.
    pub async fn submit(
        &mut self,
        service: &dyn CampaignService,
    ) -> Result<CampaignRecord, SubmitError> {
        let draft = self.draft.as_ref().ok_or(DraftError::NotEditing)?;
        let payload = draft.to_payload()?;

        self.state = EditorState::Submitting;
        let result = match &self.editing_id {
            Some(id) => service.update(id, payload).await,
            None => service.create(payload).await,
        };

        match result {
            Ok(record) => {
                tracing::info!(id = %record.id, "Campaign saved");
                self.state = EditorState::Saved;
                self.draft = None;
                self.editing_id = None;
                self.last_error = None;
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Campaign submission failed");
                self.state = EditorState::Editing;
                self.last_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }
}

/// Bulk discount pricing: percent of the reference price or a fixed amount,
/// floored to a whole number and never negative.
fn bulk_sale_price(original_price: f64, mode: DiscountMode, value: f64) -> f64 {
    let price = match mode {
        DiscountMode::Percentage => original_price * (1.0 - value / 100.0),
        DiscountMode::FixedAmount => value,
    };
    price.floor().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use shared::collab::{CollabError, CollabResult};
    use shared::models::CampaignPayload;
    use std::sync::atomic::{AtomicUsize, Ordering};

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

    fn editor_with_product(id: &str, price: f64, stock: i64) -> FlashSaleDraftEditor {
        let mut editor = FlashSaleDraftEditor::new();
        editor.open_create(now());
        assert!(editor.add_product(&snapshot(id, price, stock)));
        editor
    }

    struct FixedCatalog(Vec<ProductSnapshot>);

    #[async_trait]
    impl CatalogLookup for FixedCatalog {
        async fn products_by_tags(&self, _tag_ids: &[String]) -> CollabResult<Vec<ProductSnapshot>> {
            Ok(self.0.clone())
        }
    }

    struct StubService {
        fail_with: Option<CollabError>,
        calls: AtomicUsize,
    }

    impl StubService {
        fn ok() -> Self {
            Self {
                fail_with: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: CollabError) -> Self {
            Self {
                fail_with: Some(err),
                calls: AtomicUsize::new(0),
            }
        }

        fn record_from(payload: &CampaignPayload, id: &str) -> CampaignRecord {
            CampaignRecord {
                id: id.to_string(),
                name: payload.name.clone(),
                description: payload.description.clone(),
                start_time: payload.start_time,
                end_time: payload.end_time,
                is_active: payload.is_active,
                show_in_hero: payload.show_in_hero,
                enable_notification: payload.enable_notification,
                is_member_only: payload.is_member_only,
                can_use_coupon: payload.can_use_coupon,
                no_cod: payload.no_cod,
                priority: payload.priority,
                campaign_id: payload.campaign_id.clone(),
                banner_url: None,
                bg_color: payload.bg_color.clone(),
                text_color: payload.text_color.clone(),
                conditions_text: payload.conditions_text.clone(),
                products: payload.products.clone(),
            }
        }
    }

    #[async_trait]
    impl CampaignService for StubService {
        async fn create(&self, payload: CampaignPayload) -> CollabResult<CampaignRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(Self::record_from(&payload, "fs-1")),
            }
        }

        async fn update(&self, id: &str, payload: CampaignPayload) -> CollabResult<CampaignRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(Self::record_from(&payload, id)),
            }
        }
    }

    #[test]
    fn test_duplicate_add_leaves_existing_row_untouched() {
        let mut editor = editor_with_product("p1", 100.0, 10);
        editor.update_row(0, RowField::SalePrice, "80");

        assert!(!editor.add_product(&snapshot("p1", 100.0, 10)));
        let draft = editor.draft().unwrap();
        assert_eq!(draft.products.len(), 1);
        assert_eq!(draft.products[0].sale_price, Some(80.0));
    }

    #[test]
    fn test_sale_price_clamps_below_original() {
        let mut editor = editor_with_product("p1", 100.0, 10);

        editor.update_row(0, RowField::SalePrice, "250");
        assert_eq!(editor.draft().unwrap().products[0].sale_price, Some(99.0));

        editor.update_row(0, RowField::SalePrice, "100");
        assert_eq!(editor.draft().unwrap().products[0].sale_price, Some(99.0));

        editor.update_row(0, RowField::SalePrice, "45.50");
        assert_eq!(editor.draft().unwrap().products[0].sale_price, Some(45.5));
    }

    #[test]
    fn test_sale_price_clamp_for_one_baht_product() {
        let mut editor = editor_with_product("p1", 1.0, 10);
        editor.update_row(0, RowField::SalePrice, "5");
        assert_eq!(editor.draft().unwrap().products[0].sale_price, Some(0.0));
    }

    #[test]
    fn test_limit_clamps_to_stock() {
        let mut editor = editor_with_product("p1", 100.0, 10);

        editor.update_row(0, RowField::Limit, "999");
        assert_eq!(editor.draft().unwrap().products[0].limit, Some(10));

        editor.update_row(0, RowField::Limit, "3");
        assert_eq!(editor.draft().unwrap().products[0].limit, Some(3));
    }

    #[test]
    fn test_empty_input_held_as_pending() {
        let mut editor = editor_with_product("p1", 100.0, 10);

        editor.update_row(0, RowField::SalePrice, "");
        assert_eq!(editor.draft().unwrap().products[0].sale_price, None);
        assert!(editor.validate().is_err());

        editor.update_row(0, RowField::SalePrice, "50");
        assert!(editor.validate().is_ok());
    }

    #[test]
    fn test_remove_row_drops_pending_state() {
        let mut editor = editor_with_product("p1", 100.0, 10);
        editor.add_product(&snapshot("p2", 50.0, 5));
        editor.update_row(0, RowField::SalePrice, "");

        editor.remove_row(0);
        let draft = editor.draft().unwrap();
        assert_eq!(draft.products.len(), 1);
        assert_eq!(draft.products[0].product_id, "p2");
        assert!(editor.validate().is_ok());
    }

    #[tokio::test]
    async fn test_bulk_add_percent_mode_floors() {
        let mut editor = FlashSaleDraftEditor::new();
        editor.open_create(now());
        let catalog = FixedCatalog(vec![snapshot("p1", 199.0, 40)]);

        let added = editor
            .add_products_by_tag(
                &catalog,
                &["hot".to_string()],
                DiscountMode::Percentage,
                15.0,
            )
            .await
            .unwrap();

        assert_eq!(added, 1);
        let row = &editor.draft().unwrap().products[0];
        // 199 * 0.85 = 169.15, floored.
        assert_eq!(row.sale_price, Some(169.0));
        assert_eq!(row.limit, Some(40));
    }

    #[tokio::test]
    async fn test_bulk_add_fixed_mode_never_negative() {
        let mut editor = FlashSaleDraftEditor::new();
        editor.open_create(now());
        let catalog = FixedCatalog(vec![snapshot("p1", 199.0, 40)]);

        editor
            .add_products_by_tag(
                &catalog,
                &["hot".to_string()],
                DiscountMode::FixedAmount,
                -5.0,
            )
            .await
            .unwrap();

        assert_eq!(editor.draft().unwrap().products[0].sale_price, Some(0.0));
    }

    #[tokio::test]
    async fn test_bulk_add_twice_adds_nothing_new() {
        let mut editor = FlashSaleDraftEditor::new();
        editor.open_create(now());
        let catalog = FixedCatalog(vec![snapshot("p1", 199.0, 40), snapshot("p2", 99.0, 5)]);
        let tags = vec!["hot".to_string()];

        let first = editor
            .add_products_by_tag(&catalog, &tags, DiscountMode::Percentage, 10.0)
            .await
            .unwrap();
        assert_eq!(first, 2);

        let second = editor
            .add_products_by_tag(&catalog, &tags, DiscountMode::Percentage, 10.0)
            .await
            .unwrap();
        assert_eq!(second, 0);
        assert_eq!(editor.draft().unwrap().products.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_success_transitions_to_saved() {
        let mut editor = editor_with_product("p1", 100.0, 10);
        editor.draft_mut().unwrap().name = "Payday sale".to_string();
        let service = StubService::ok();

        let record = editor.submit(&service).await.unwrap();
        assert_eq!(record.name, "Payday sale");
        assert_eq!(editor.state(), EditorState::Saved);
        assert!(editor.draft().is_none());
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_returns_to_editing_with_draft() {
        let mut editor = editor_with_product("p1", 100.0, 10);
        let service = StubService::failing(CollabError::Server("quota exceeded".to_string()));

        let err = editor.submit(&service).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Collab(CollabError::Server(ref m)) if m == "quota exceeded"
        ));
        assert_eq!(editor.state(), EditorState::Editing);
        assert!(editor.draft().is_some());
        assert_eq!(editor.last_error(), Some("quota exceeded"));
    }

    #[tokio::test]
    async fn test_submit_auth_required_is_distinct() {
        let mut editor = editor_with_product("p1", 100.0, 10);
        let service = StubService::failing(CollabError::AuthRequired);

        let err = editor.submit(&service).await.unwrap_err();
        assert!(matches!(err, SubmitError::Collab(CollabError::AuthRequired)));
        // Draft is kept so the operator does not lose work on re-auth.
        assert!(editor.draft().is_some());
    }

    #[tokio::test]
    async fn test_submit_without_products_is_blocked_before_service_call() {
        let mut editor = FlashSaleDraftEditor::new();
        editor.open_create(now());
        let service = StubService::ok();

        let err = editor.submit(&service).await.unwrap_err();
        assert!(matches!(err, SubmitError::Draft(DraftError::NoProducts)));
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_open_edit_submits_as_update() {
        let mut editor = editor_with_product("p1", 100.0, 10);
        let service = StubService::ok();
        let record = editor.submit(&service).await.unwrap();

        editor.open_edit(&record);
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.draft().unwrap().products.len(), 1);

        let updated = editor.submit(&service).await.unwrap();
        assert_eq!(updated.id, record.id);
    }

    #[test]
    fn test_discard_releases_draft() {
        let mut editor = editor_with_product("p1", 100.0, 10);
        editor.discard();
        assert_eq!(editor.state(), EditorState::Discarded);
        assert!(editor.draft().is_none());

        editor.open_create(now());
        assert_eq!(editor.state(), EditorState::Editing);
        assert!(editor.draft().unwrap().products.is_empty());
    }
}
