//! Integration test support for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Everything runs in-process: [`FakeStockApi`] stands in for the remote
//! stock service on an ephemeral port, and [`TestStorefront`] serves the real
//! storefront router against it.
//!
//! # Test Categories
//!
//! - `stock_client` - Stock API client against the fake backend
//! - `storefront_stock` - Stock mirror routes
//! - `storefront_cart` - Cart routes and the availability gate
//! - `storefront_account` - Account routes, driven in-process

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::routes;
use shopfront_storefront::state::AppState;

// =============================================================================
// Fake stock API
// =============================================================================

/// How the fake answers `GET /api/getStock` for one product.
#[derive(Debug, Clone)]
pub enum StockReply {
    /// 200 with `{"quantity": n}`.
    Quantity(i64),
    /// The given status with an error body.
    Status(StatusCode),
    /// 200 with a raw (possibly malformed) body.
    Raw(&'static str),
}

#[derive(Debug)]
struct FakeInventory {
    listing: Result<Value, StatusCode>,
    levels: HashMap<String, StockReply>,
    listing_requests: usize,
    stock_requests: Vec<String>,
}

/// In-process stand-in for the remote stock API.
#[derive(Clone)]
pub struct FakeStockApi {
    addr: SocketAddr,
    inner: Arc<Mutex<FakeInventory>>,
}

impl FakeStockApi {
    /// Start the fake on an ephemeral port with an empty listing.
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(FakeInventory {
            listing: Ok(json!([])),
            levels: HashMap::new(),
            listing_requests: 0,
            stock_requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/api/getAllStock", get(all_stock))
            .route("/api/getStock", get(one_stock))
            .with_state(Arc::clone(&inner));

        let addr = serve(app).await;
        Self { addr, inner }
    }

    /// Base URL to hand to the storefront.
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("valid fake URL")
    }

    /// Serve `listing` from `/api/getAllStock`.
    pub fn set_listing(&self, listing: Value) {
        self.lock().listing = Ok(listing);
    }

    /// Make `/api/getAllStock` fail with `status`.
    pub fn fail_listing(&self, status: StatusCode) {
        self.lock().listing = Err(status);
    }

    /// Configure the reply for `/api/getStock?id=<id>`.
    pub fn set_stock(&self, id: i64, reply: StockReply) {
        self.lock().levels.insert(id.to_string(), reply);
    }

    /// Number of `/api/getAllStock` calls served.
    pub fn listing_requests(&self) -> usize {
        self.lock().listing_requests
    }

    /// `id` parameters of every `/api/getStock` call, in order.
    pub fn stock_requests(&self) -> Vec<String> {
        self.lock().stock_requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeInventory> {
        self.inner.lock().expect("fake inventory lock")
    }
}

type Inventory = Arc<Mutex<FakeInventory>>;

async fn all_stock(State(inventory): State<Inventory>) -> Response {
    let mut inventory = inventory.lock().expect("fake inventory lock");
    inventory.listing_requests += 1;
    match &inventory.listing {
        Ok(listing) => Json(listing.clone()).into_response(),
        Err(status) => (*status, "listing unavailable").into_response(),
    }
}

async fn one_stock(
    State(inventory): State<Inventory>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut inventory = inventory.lock().expect("fake inventory lock");
    let id = params.get("id").cloned().unwrap_or_default();
    inventory.stock_requests.push(id.clone());

    match inventory.levels.get(&id) {
        Some(StockReply::Quantity(quantity)) => {
            Json(json!({ "quantity": quantity })).into_response()
        }
        Some(StockReply::Status(status)) => (*status, "stock lookup failed").into_response(),
        Some(StockReply::Raw(body)) => (StatusCode::OK, *body).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown product").into_response(),
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("valid URL")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

// =============================================================================
// Storefront under test
// =============================================================================

/// Configuration pointing at `stock_api_url`, with no startup refresh.
pub fn test_config(stock_api_url: &Url) -> StorefrontConfig {
    let stock_api_url = stock_api_url.to_string();
    StorefrontConfig::from_source(|key| match key {
        "STOCK_API_URL" => Some(stock_api_url.clone()),
        "STOCK_REFRESH_ON_STARTUP" => Some("false".to_string()),
        _ => None,
    })
    .expect("valid test config")
}

/// A running storefront server.
pub struct TestStorefront {
    pub state: AppState,
    pub client: reqwest::Client,
    base_url: String,
}

impl TestStorefront {
    /// Serve the storefront on an ephemeral port.
    pub async fn start(stock_api_url: &Url) -> Self {
        let state = AppState::new(test_config(stock_api_url));
        let addr = serve(routes::app(state.clone())).await;

        Self {
            state,
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a storefront path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a path and decode the JSON body.
    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("storefront request");
        decode(response).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("storefront request");
        decode(response).await
    }

    /// Sign in the fixture user from [`user_json`].
    pub async fn sign_in(&self) {
        let response = self
            .client
            .put(self.url("/account"))
            .json(&user_json())
            .send()
            .await
            .expect("sign in");
        assert_eq!(response.status(), StatusCode::OK, "sign in");
    }

    /// DELETE a path and decode the JSON response.
    pub async fn delete_json(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("storefront request");
        decode(response).await
    }
}

async fn decode(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.text().await.expect("response body");
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    (status, value)
}

/// A product payload as the listing UI would post it.
pub fn product_json(id: i64, name: &str, price: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": { "amount": price, "currency_code": "USD" },
        "category": "kitchen",
    })
}

/// A user payload as the upstream auth layer would hand it over.
pub fn user_json() -> Value {
    json!({
        "id": 1,
        "name": "Ada Lovelace",
        "email": "ada@example.com",
    })
}
