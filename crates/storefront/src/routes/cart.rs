//! Cart route handlers.
//!
//! Additions go through the availability gate (sign-in, mirror, live stock);
//! everything else is a plain dispatch against the store.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;

use shopfront_core::{OrderRef, Price};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{CartItem, Order, Product};
use crate::services::{BlockReason, Blocked, Toast, availability};
use crate::state::AppState;
use crate::store::{Action, CartAction, RootState};

/// A cart line with derived values.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub item: CartItem,
    /// `None` when the line total overflows.
    pub line_price: Option<Price>,
    /// Quantity currently in the stock mirror, if the mirror knows the product.
    pub mirrored_stock: Option<u32>,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u32,
    /// `None` when lines use different currencies or the total overflows.
    pub subtotal: Option<Price>,
}

impl CartView {
    /// Build the view from the cart and stock slices.
    #[must_use]
    pub fn from_state(state: &RootState) -> Self {
        Self {
            items: state
                .cart
                .items()
                .iter()
                .map(|item| CartLineView {
                    item: item.clone(),
                    line_price: item.line_price(),
                    mirrored_stock: state.stock.quantity_of(item.name()),
                })
                .collect(),
            item_count: state.cart.item_count(),
            subtotal: state.cart.subtotal(),
        }
    }
}

/// Response of a successful add.
#[derive(Debug, Serialize)]
pub struct AddedView {
    pub item: CartItem,
    pub toast: Toast,
}

/// Response of a checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    /// The recorded order; `None` when nobody is signed in and the cart was
    /// discarded.
    pub order: Option<Order>,
}

impl IntoResponse for Blocked {
    fn into_response(self) -> Response {
        let status = match self.reason {
            BlockReason::SignInRequired => StatusCode::UNAUTHORIZED,
            BlockReason::OutOfStock => StatusCode::CONFLICT,
            BlockReason::Unconfirmed => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(self)).into_response()
    }
}

/// Display cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(state.store().select(CartView::from_state))
}

/// Add one unit of a product, after confirming remote stock.
#[instrument(skip(state, product), fields(name = %product.name))]
pub async fn add(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> std::result::Result<(StatusCode, Json<AddedView>), Blocked> {
    let name = product.name.clone();
    let item = availability::add_to_cart(state.stock(), state.store(), product).await?;
    add_breadcrumb("cart", &format!("Added {name}"));

    Ok((
        StatusCode::CREATED,
        Json(AddedView {
            item,
            toast: Toast::added_to_cart(&name),
        }),
    ))
}

/// Remove the line at `index`. Out-of-range indexes leave the cart as is.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(index): Path<usize>) -> Json<CartView> {
    state.store().dispatch(CartAction::RemoveAt(index));
    Json(state.store().select(CartView::from_state))
}

/// Move the cart into the signed-in user's order history.
///
/// This is a local transition only; no stock is decremented anywhere.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Json<CheckoutView>> {
    let reference = OrderRef::generate();
    let checkout = Action::Checkout {
        reference,
        placed_at: Utc::now(),
    };
    if !state.store().dispatch_if(checkout, |s| !s.cart.is_empty()) {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }
    add_breadcrumb("cart", &format!("Checked out order {reference}"));

    let order = state.store().select(|s| {
        s.account
            .orders()
            .iter()
            .find(|order| order.reference == reference)
            .cloned()
    });
    if order.is_none() {
        tracing::info!(%reference, "Checkout without a signed-in user; order discarded");
    }

    Ok(Json(CheckoutView { order }))
}
