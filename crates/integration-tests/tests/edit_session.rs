//! End-to-end tests for the edit-session flow.
//!
//! These drive a real session - reference gate, single-shot product load,
//! field edits, multipart save - against the in-process mock platform.

use std::sync::atomic::Ordering;

use tradewind_core::StockPolicy;
use tradewind_integration_tests::{FIXTURE_PRODUCT_ID, TestContext};
use tradewind_seller::EditorError;
use tradewind_seller::api::ApiError;
use tradewind_seller::form::images::StagedImage;
use tradewind_seller::session::{LoadOutcome, SessionPhase};

// =============================================================================
// Load flow
// =============================================================================

#[tokio::test]
async fn test_full_load_populates_the_form() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session(FIXTURE_PRODUCT_ID);

    session.load_references().await;
    assert!(session.references().is_fully_loaded());

    let outcome = session.load_product().await.expect("product loads");
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(session.phase(), SessionPhase::Ready);

    let form = session.form().expect("form is populated");
    assert_eq!(form.name, "Oak Dining Table");
    assert_eq!(form.category_id.as_str(), "5");
    assert!(form.settings.returnable);
    assert!(!form.settings.cancelable);
    assert!(form.settings.cod_allowed);
    assert_eq!(form.tags.len(), 2);

    // is_unlimited_stock=false on the wire means the primary tracks stock
    assert_eq!(form.variants.primary().stock_policy, StockPolicy::Limited);
    assert_eq!(form.variants.primary().price, "19.99");

    // Both legacy gallery shapes landed as existing refs
    assert_eq!(form.images.gallery_len(), 2);
    assert!(form.images.main().is_some());
}

#[tokio::test]
async fn test_second_load_call_does_not_refetch() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;

    let first = session.load_product().await.expect("first load");
    assert_eq!(first, LoadOutcome::Loaded);

    let second = session.load_product().await.expect("second call is a no-op");
    assert_eq!(second, LoadOutcome::Skipped);

    assert_eq!(ctx.mock.state.product_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_product_is_a_terminal_not_found() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("99");
    session.load_references().await;

    let error = session.load_product().await.unwrap_err();
    assert!(matches!(error, EditorError::ProductNotFound));
    assert_eq!(session.phase(), SessionPhase::NotFound);
    assert!(session.form().is_none());

    let error = session.save().await.unwrap_err();
    assert!(matches!(error, EditorError::NotReady));
}

#[tokio::test]
async fn test_applicable_attributes_follow_the_selected_category() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;
    session.load_product().await.expect("product loads");

    // Category 5 matches only the "Wood Type" attribute
    let attrs = session.applicable_attributes();
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].label, "Wood Type");
}

// =============================================================================
// Save flow
// =============================================================================

#[tokio::test]
async fn test_save_sends_primary_first_and_aggregated_stock_flag() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;
    session.load_product().await.expect("product loads");

    {
        let form = session.form_mut().expect("form is editable");
        form.variants.add_empty();
        assert_eq!(form.variants.additional().len(), 1);
        // Inherited from the primary's product-wide choice
        assert_eq!(
            form.variants.additional()[0].stock_policy,
            StockPolicy::Limited
        );
    }

    session.validate_variant_step().expect("primary is complete");
    let receipt = session.save().await.expect("save succeeds");
    assert_eq!(receipt.message, "Product updated");

    let update = ctx.mock.state.last_update();
    assert_eq!(update.fields.get("product_id").map(String::as_str), Some("12"));
    assert_eq!(
        update.fields.get("is_unlimited_stock").map(String::as_str),
        Some("0")
    );

    let variants: serde_json::Value =
        serde_json::from_str(update.fields.get("variants").expect("variants field"))
            .expect("variants JSON");
    let rows = variants.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], "5");
    assert_eq!(rows[1]["id"], "");

    // Specification values ride along verbatim
    let attrs: serde_json::Value =
        serde_json::from_str(update.fields.get("product_attributes").expect("field"))
            .expect("JSON");
    assert_eq!(attrs["2"], "Oak");

    // Unset optional references use the null sentinel
    assert_eq!(update.fields.get("brand_id").map(String::as_str), Some("null"));
}

#[tokio::test]
async fn test_save_carries_staged_files_and_deletions() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;
    session.load_product().await.expect("product loads");

    {
        let form = session.form_mut().expect("form is editable");
        form.images
            .set_main(StagedImage::new("new-main.jpg", vec![1, 2, 3]))
            .expect("valid file");
        form.images
            .add_gallery_files(vec![StagedImage::new("extra.png", vec![4, 5, 6])])
            .expect("valid batch");
        // Drop the first existing gallery image (id 31)
        form.images.remove_gallery_at(0);
    }

    session.save().await.expect("save succeeds");

    let update = ctx.mock.state.last_update();
    // Replacing the main image queued the old id (41) plus the removed
    // gallery id (31)
    let deleted: serde_json::Value =
        serde_json::from_str(update.fields.get("delete_image_ids").expect("field"))
            .expect("JSON");
    let deleted: Vec<&str> = deleted
        .as_array()
        .expect("array")
        .iter()
        .filter_map(serde_json::Value::as_str)
        .collect();
    assert!(deleted.contains(&"41"));
    assert!(deleted.contains(&"31"));

    assert!(update.files.contains(&("main_image".to_string(), "new-main.jpg".to_string())));
    assert!(update.files.contains(&("other_images[]".to_string(), "extra.png".to_string())));
}

#[tokio::test]
async fn test_rejected_save_surfaces_the_server_message_and_stays_editable() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;
    session.load_product().await.expect("product loads");

    *ctx.mock.state.update_response.lock().unwrap() = serde_json::json!({
        "status": 0,
        "message": "Variant price is required"
    });

    let error = session.save().await.unwrap_err();
    match error {
        EditorError::Api(ApiError::Rejected(message)) => {
            assert_eq!(message, "Variant price is required");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The form stays populated and a retry is allowed
    assert_eq!(session.phase(), SessionPhase::Ready);
    assert!(session.form().is_some());

    *ctx.mock.state.update_response.lock().unwrap() = serde_json::json!({
        "status": 1,
        "message": "Product updated"
    });
    session.save().await.expect("retry succeeds");
    assert_eq!(ctx.mock.state.update_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_validation_blocks_step_with_every_missing_field() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;
    session.load_product().await.expect("product loads");

    {
        let form = session.form_mut().expect("form is editable");
        form.variants.update_primary(
            tradewind_seller::form::variants::VariantField::Measurement,
            "",
        );
        form.variants
            .update_primary(tradewind_seller::form::variants::VariantField::Price, "0");
    }

    let error = session.validate_variant_step().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Missing required fields: measurement, price"
    );
}
