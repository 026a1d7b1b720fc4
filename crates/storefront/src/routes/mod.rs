//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Health check
//!
//! # Stock mirror
//! GET    /stock                    - Mirrored stock and loading flag
//! POST   /stock/refresh            - Refresh the mirror from the stock API
//! GET    /stock/live/{id}          - Live stock for one product
//!
//! # Cart
//! GET    /cart                     - Cart lines, item count, subtotal
//! POST   /cart/items               - Add a product (availability-gated)
//! DELETE /cart/items/{index}       - Remove the line at a position
//! POST   /cart/checkout            - Move the cart into order history
//!
//! # Account
//! GET    /account                  - Signed-in user
//! PUT    /account                  - Sign in (user document from upstream auth)
//! DELETE /account                  - Sign out
//! PUT    /account/profile          - Update name / email
//! PUT    /account/role             - Set role
//! PUT    /account/address          - Set shipping address
//! PUT    /account/payment-method   - Set payment method
//! GET    /account/orders           - Order history
//! DELETE /account/orders/{index}   - Remove an order by position
//! ```

pub mod account;
pub mod cart;
pub mod stock;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the stock routes router.
pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stock::show))
        .route("/refresh", post(stock::refresh))
        .route("/live/{id}", get(stock::live))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/{index}", delete(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(account::show)
                .put(account::sign_in)
                .delete(account::sign_out),
        )
        .route("/profile", put(account::update_profile))
        .route("/role", put(account::set_role))
        .route("/address", put(account::set_address))
        .route("/payment-method", put(account::set_payment_method))
        .route("/orders", get(account::orders))
        .route("/orders/{index}", delete(account::delete_order))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/stock", stock_routes())
        .nest("/cart", cart_routes())
        .nest("/account", account_routes())
}

/// Build the full application: routes, state, request IDs and tracing.
pub fn app(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
