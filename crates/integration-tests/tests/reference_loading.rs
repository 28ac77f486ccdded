//! Integration tests for reference-data loading.

use std::sync::atomic::Ordering;

use tradewind_integration_tests::TestContext;
use tradewind_seller::session::SessionPhase;

#[tokio::test]
async fn test_reference_lists_load_in_server_order() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;

    let refs = session.references();
    assert!(refs.is_fully_loaded());
    assert_eq!(refs.taxes.items().len(), 2);
    assert_eq!(refs.taxes.items()[0].label, "GST 5%");
    assert_eq!(refs.tags.items().len(), 2);
    assert_eq!(refs.attributes.items().len(), 2);
}

#[tokio::test]
async fn test_category_markup_is_flattened_with_depth() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;

    let categories = session.references().categories.items();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0].label, "Furniture");
    assert_eq!(categories[0].depth, 0);
    assert_eq!(categories[1].label, "Tables");
    assert_eq!(categories[1].depth, 1);
}

#[tokio::test]
async fn test_failed_list_loads_empty_and_the_gate_still_opens() {
    let ctx = TestContext::new().await;
    ctx.mock.state.fail_colors.store(true, Ordering::SeqCst);

    let mut session = ctx.session("12");
    session.load_references().await;

    let refs = session.references();
    // The outage surfaces only as an empty dropdown
    assert!(refs.colors.items().is_empty());
    assert!(refs.colors.is_loaded());
    // Healthy lists are unaffected and the gate opens
    assert_eq!(refs.taxes.items().len(), 2);
    assert!(refs.is_fully_loaded());

    // The product load proceeds despite the outage
    session.load_product().await.expect("product loads");
    assert_eq!(session.phase(), SessionPhase::Ready);
}

#[tokio::test]
async fn test_select_attributes_carry_their_options() {
    let ctx = TestContext::new().await;
    let mut session = ctx.session("12");
    session.load_references().await;

    let attributes = session.references().attributes.items();
    let finish = attributes
        .iter()
        .find(|a| a.label == "Finish")
        .expect("select attribute present");
    assert_eq!(finish.options, vec!["Matte", "Gloss"]);
}
