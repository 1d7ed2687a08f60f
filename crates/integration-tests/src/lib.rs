//! Integration tests for Mini Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mini-store-integration-tests
//! ```
//!
//! No network access is needed: [`MockProductApi`] serves a small
//! fakestore-style `/products` API on a random local port.
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP client, caching and error mapping
//! - `shell_session` - End-to-end shell sessions over the cart and wishlist

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

/// Alternate list path, as served by keyed table-style upstreams.
pub const TABLE_PATH: &str = "rest/v1/items";

/// Product id the mock answers with `200 OK` and an empty body.
pub const EMPTY_BODY_ID: i32 = 98;

/// Product id the mock answers with `500 Internal Server Error`.
pub const SERVER_ERROR_ID: i32 = 99;

/// Fixture catalog in the fakestore response shape.
#[must_use]
pub fn fixture_products() -> Vec<Value> {
    let rows = [
        (1, "Fjallraven Backpack", 109.95, "men's clothing"),
        (2, "Mens Casual Premium Slim Fit T-Shirts", 22.3, "men's clothing"),
        (3, "Mens Cotton Jacket", 55.99, "men's clothing"),
        (4, "Mens Casual Slim Fit", 15.99, "men's clothing"),
        (5, "John Hardy Women's Bracelet", 695.0, "jewelery"),
        (6, "Solid Gold Petite Micropave", 168.0, "jewelery"),
        (7, "White Gold Plated Princess", 9.99, "jewelery"),
    ];

    rows.into_iter()
        .map(|(id, title, price, category)| {
            json!({
                "id": id,
                "title": title,
                "price": price,
                "description": format!("Description of {title}"),
                "category": category,
                "image": format!("https://img.example/{id}.jpg"),
                "rating": { "rate": 4.1, "count": 120 + id },
            })
        })
        .collect()
}

#[derive(Default)]
struct MockState {
    products: Vec<Value>,
    requests: AtomicUsize,
    api_keys: Mutex<Vec<String>>,
}

impl MockState {
    fn record(&self, headers: &HeaderMap) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(key) = headers.get("x-api-key").and_then(|v| v.to_str().ok()) {
            self.api_keys
                .lock()
                .expect("api key log poisoned")
                .push(key.to_string());
        }
    }
}

/// A running mock product API.
pub struct MockProductApi {
    base_url: Url,
    state: Arc<MockState>,
}

impl MockProductApi {
    /// Serve [`fixture_products`] on `127.0.0.1` with an OS-assigned port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        Self::with_products(fixture_products()).await
    }

    /// Serve the given products.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn with_products(products: Vec<Value>) -> Self {
        let state = Arc::new(MockState {
            products,
            ..MockState::default()
        });

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .route(&format!("/{TABLE_PATH}"), get(list_products))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API listener");
        let addr = listener.local_addr().expect("Mock API has no local address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url =
            Url::parse(&format!("http://{addr}")).expect("Mock API address is not a URL");
        Self { base_url, state }
    }

    /// Base URL to configure the client with (no `/products` suffix).
    #[must_use]
    pub fn base_url(&self) -> Url {
        self.base_url.clone()
    }

    /// Requests served so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// `X-api-key` values received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if a handler panicked while holding the log.
    #[must_use]
    pub fn api_keys(&self) -> Vec<String> {
        self.state
            .api_keys
            .lock()
            .expect("api key log poisoned")
            .clone()
    }
}

async fn list_products(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    state.record(&headers);

    let page = params.get("page").and_then(|p| p.parse::<usize>().ok());
    let limit = params.get("limit").and_then(|l| l.parse::<usize>().ok());

    let products = match (page, limit) {
        (Some(page), Some(limit)) => state
            .products
            .iter()
            .skip(page.saturating_sub(1) * limit)
            .take(limit)
            .cloned()
            .collect(),
        _ => state.products.clone(),
    };
    Json(products)
}

async fn get_product(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    state.record(&headers);

    match id {
        EMPTY_BODY_ID => StatusCode::OK.into_response(),
        SERVER_ERROR_ID => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => state
            .products
            .iter()
            .find(|p| p["id"] == id)
            .map_or_else(
                || StatusCode::NOT_FOUND.into_response(),
                |p| Json(p.clone()).into_response(),
            ),
    }
}
