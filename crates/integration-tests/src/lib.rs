//! Integration tests for the Tradewind seller editor.
//!
//! The [`TestContext`] spins an in-process mock of the platform seller
//! API on an ephemeral port: canned reference lists, a product fixture,
//! per-endpoint hit counters, and multipart capture of the update
//! request. Tests drive a real [`EditorSession`] against it - the same
//! client, the same wire - so the whole load/edit/save flow is exercised
//! end to end.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tradewind-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test support code; panicking on a broken fixture is the right failure mode.
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use tradewind_core::{ProductId, SellerCredentials, SellerId};
use tradewind_seller::config::PlatformConfig;
use tradewind_seller::session::EditorSession;

/// The product id the default fixture answers for.
pub const FIXTURE_PRODUCT_ID: &str = "12";

/// The update request as the mock server received it.
#[derive(Debug, Clone, Default)]
pub struct CapturedUpdate {
    /// Text fields by name.
    pub fields: BTreeMap<String, String>,
    /// File parts as `(part name, file name)` pairs.
    pub files: Vec<(String, String)>,
}

/// Shared, inspectable state behind the mock platform.
pub struct MockState {
    /// Hits on the product-fetch endpoint.
    pub product_hits: AtomicUsize,
    /// Hits on the product-update endpoint.
    pub update_hits: AtomicUsize,
    /// When set, the colors endpoint answers 500.
    pub fail_colors: AtomicBool,
    /// Envelope the update endpoint answers with.
    pub update_response: Mutex<Value>,
    /// The last captured update request.
    pub captured_update: Mutex<Option<CapturedUpdate>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            product_hits: AtomicUsize::new(0),
            update_hits: AtomicUsize::new(0),
            fail_colors: AtomicBool::new(false),
            update_response: Mutex::new(json!({
                "status": 1,
                "message": "Product updated"
            })),
            captured_update: Mutex::new(None),
        }
    }
}

impl MockState {
    /// The last captured update, panicking if none arrived.
    pub fn last_update(&self) -> CapturedUpdate {
        self.captured_update
            .lock()
            .unwrap()
            .clone()
            .expect("an update request was captured")
    }
}

/// An in-process mock of the platform seller API.
pub struct MockPlatform {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

impl MockPlatform {
    /// Bind the mock on an ephemeral port and start serving.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/seller/categories", get(categories))
            .route("/seller/attributes", get(attributes))
            .route("/seller/taxes", get(taxes))
            .route("/seller/brands", get(brands))
            .route("/seller/colors", get(colors))
            .route("/seller/sizes", get(sizes))
            .route("/seller/materials", get(named_list))
            .route("/seller/patterns", get(named_list))
            .route("/seller/units", get(units))
            .route("/seller/countries", get(named_list))
            .route("/seller/tags", get(tags))
            .route("/seller/warranties", get(named_list))
            .route("/seller/products/{id}", get(product))
            .route("/seller/products/update", post(update))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }
}

/// A mock platform plus a client configuration pointed at it.
pub struct TestContext {
    pub mock: MockPlatform,
    pub config: PlatformConfig,
}

impl TestContext {
    /// Spin up a mock platform and a configuration for it.
    pub async fn new() -> Self {
        let mock = MockPlatform::spawn().await;
        let credentials = SellerCredentials::new(SellerId::new("7"), "tw_test_token");
        let config = PlatformConfig::new(&format!("http://{}", mock.addr), credentials).unwrap();
        Self { mock, config }
    }

    /// Open an edit session against the mock.
    #[must_use]
    pub fn session(&self, product_id: &str) -> EditorSession {
        EditorSession::new(&self.config, ProductId::new(product_id))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn rows(pairs: &[(&str, &str)]) -> Value {
    let data: Vec<Value> = pairs
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    json!({"status": 1, "data": data})
}

fn product_fixture() -> Value {
    json!({
        "id": 12,
        "name": "Oak Dining Table",
        "slug": "oak-dining-table",
        "category_id": 5,
        "tax_id": 2,
        "brand_id": "",
        "description": "Solid oak, seats six.",
        "tags": [3, 9],
        "return_status": "Yes",
        "cancelable_status": 0,
        "cod_allowed": 1,
        "is_unlimited_stock": false,
        "product_attributes": {"2": "Oak"},
        "main_image": "https://cdn.example.com/main.jpg",
        "main_image_id": 41,
        "other_images": [
            {"id": 31, "image_url": "https://cdn.example.com/a.jpg"},
            "https://cdn.example.com/b.jpg"
        ],
        "variants": [
            {
                "id": 5,
                "type": "packet",
                "measurement": "500",
                "price": "19.99",
                "unit_id": 2,
                "size_id": 4,
                "stock": "12",
                "status": "active"
            }
        ],
        "updated_at": "2024-03-01 10:15:00"
    })
}

// =============================================================================
// Handlers
// =============================================================================

async fn categories() -> Json<Value> {
    let markup = concat!(
        r#"<option value="1">Furniture</option>"#,
        r#"<option value="5">&nbsp;&nbsp;Tables</option>"#,
        r#"<option value="6">&nbsp;&nbsp;Chairs</option>"#,
    );
    Json(json!({"status": 1, "data": markup}))
}

async fn attributes() -> Json<Value> {
    Json(json!({
        "status": 1,
        "data": [
            {"id": 2, "name": "Wood Type", "type": "text", "category_ids": "5,6"},
            {
                "id": 7,
                "name": "Finish",
                "type": "select",
                "category_ids": "9",
                "values": "Matte, Gloss"
            }
        ]
    }))
}

async fn taxes() -> Json<Value> {
    Json(rows(&[("2", "GST 5%"), ("3", "GST 12%")]))
}

async fn brands() -> Json<Value> {
    Json(rows(&[("4", "Heartwood")]))
}

async fn colors(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    if state.fail_colors.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(rows(&[("1", "Natural"), ("2", "Walnut")])).into_response()
}

async fn sizes() -> Json<Value> {
    Json(rows(&[("4", "Six Seater")]))
}

async fn units() -> Json<Value> {
    Json(rows(&[("2", "Piece")]))
}

async fn tags() -> Json<Value> {
    Json(rows(&[("3", "handmade"), ("9", "oak")]))
}

async fn named_list() -> Json<Value> {
    Json(rows(&[("1", "Default")]))
}

async fn product(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Json<Value> {
    state.product_hits.fetch_add(1, Ordering::SeqCst);
    if id == FIXTURE_PRODUCT_ID {
        Json(json!({"status": 1, "data": product_fixture()}))
    } else {
        Json(json!({"status": 0, "message": "No such product"}))
    }
}

async fn update(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Json<Value> {
    state.update_hits.fetch_add(1, Ordering::SeqCst);

    let mut captured = CapturedUpdate::default();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(ToString::to_string);
        if let Some(file_name) = file_name {
            // Drain the body; only the part identity matters to the tests
            let _ = field.bytes().await.unwrap();
            captured.files.push((name, file_name));
        } else {
            captured.fields.insert(name, field.text().await.unwrap());
        }
    }
    *state.captured_update.lock().unwrap() = Some(captured);

    Json(state.update_response.lock().unwrap().clone())
}
