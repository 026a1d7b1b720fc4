//! Stock route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use shopfront_core::ProductId;

use crate::error::Result;
use crate::services::{Availability, inventory};
use crate::state::AppState;
use crate::store::StockMirror;

/// Response of a refresh request.
#[derive(Debug, Serialize)]
pub struct RefreshView {
    /// Whether the mirror was replaced. `false` means the previous mirror
    /// is being served.
    pub refreshed: bool,
    pub stock: StockMirror,
}

/// Live stock for a single product.
#[derive(Debug, Serialize)]
pub struct LiveStockView {
    pub product_id: ProductId,
    pub quantity: u32,
    pub availability: Availability,
}

/// Show the mirrored stock.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<StockMirror> {
    Json(state.store().select(|s| s.stock.clone()))
}

/// Refresh the mirror from the stock API.
///
/// A failed refresh is logged by the inventory service and otherwise
/// ignored.
#[instrument(skip(state))]
pub async fn refresh(State(state): State<AppState>) -> Json<RefreshView> {
    let refreshed = inventory::refresh_stock(state.stock(), state.store())
        .await
        .is_ok();

    Json(RefreshView {
        refreshed,
        stock: state.store().select(|s| s.stock.clone()),
    })
}

/// Look up live stock for one product, bypassing the mirror.
#[instrument(skip(state))]
pub async fn live(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LiveStockView>> {
    let product_id = ProductId::new(id);
    let lookup = state.stock().get_stock(product_id).await;
    let availability = Availability::from_lookup(&lookup);
    let level = lookup?;

    Ok(Json(LiveStockView {
        product_id,
        quantity: level.available(),
        availability,
    }))
}
