//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfront_core::OrderRef;

use super::CartItem;

/// A snapshot of the cart taken at checkout.
///
/// The storefront does not interpret orders beyond keeping them in the
/// user's history; fulfilment happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub reference: OrderRef,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
}
