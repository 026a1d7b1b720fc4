//! Availability gate for cart additions.
//!
//! Adding requires a signed-in user. A product the stock mirror already
//! lists at zero is refused without a network call. Otherwise its live stock
//! is fetched from the remote API, and anything short of a confirmed positive
//! quantity blocks the add. There is no reservation: stock can still run out
//! between the check and checkout.

use serde::Serialize;
use tracing::{instrument, warn};

use shopfront_core::ProductId;

use super::Toast;
use crate::models::{CartItem, Product};
use crate::stock_api::{StockApiError, StockClient, StockLevel};
use crate::store::{CartAction, RootState, Store};

/// Result of a live stock lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "quantity", rename_all = "snake_case")]
pub enum Availability {
    /// Remote reports this many units.
    InStock(u32),
    /// Remote reports zero.
    OutOfStock,
    /// The lookup failed, so nothing can be said.
    Unconfirmed,
}

impl Availability {
    /// Interpret a stock lookup.
    #[must_use]
    pub fn from_lookup(lookup: &Result<StockLevel, StockApiError>) -> Self {
        match lookup {
            Ok(level) => match level.available() {
                0 => Self::OutOfStock,
                quantity => Self::InStock(quantity),
            },
            Err(_) => Self::Unconfirmed,
        }
    }
}

/// Why an add was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    SignInRequired,
    OutOfStock,
    Unconfirmed,
}

/// A refused add, with the toast to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blocked {
    pub reason: BlockReason,
    pub toast: Toast,
}

/// Look up live stock for one product.
#[instrument(skip(client))]
pub async fn check(client: &StockClient, id: ProductId) -> Availability {
    let lookup = client.get_stock(id).await;
    if let Err(e) = &lookup {
        warn!(error = %e, "Stock check failed");
    }
    Availability::from_lookup(&lookup)
}

/// Refusals decided from local state alone, before any remote lookup.
#[must_use]
pub fn local_block(state: &RootState, product: &Product) -> Option<Blocked> {
    if state.account.user().is_none() {
        return Some(Blocked {
            reason: BlockReason::SignInRequired,
            toast: Toast::sign_in_required(),
        });
    }
    (state.stock.quantity_of(&product.name) == Some(0)).then(|| Blocked {
        reason: BlockReason::OutOfStock,
        toast: Toast::out_of_stock(&product.name),
    })
}

/// Add one unit of `product` to the cart if the remote confirms stock.
///
/// The confirmed quantity is recorded on the line's product fields.
///
/// # Errors
///
/// Returns [`Blocked`] when nobody is signed in, the mirror or the remote
/// reports no stock, or the lookup fails.
#[instrument(skip(client, store, product), fields(product_id = %product.id, name = %product.name))]
pub async fn add_to_cart(
    client: &StockClient,
    store: &Store,
    product: Product,
) -> Result<CartItem, Blocked> {
    if let Some(blocked) = store.select(|state| local_block(state, &product)) {
        return Err(blocked);
    }

    match check(client, product.id).await {
        Availability::InStock(quantity) => Ok(add_confirmed(store, product, quantity)),
        Availability::OutOfStock => Err(Blocked {
            reason: BlockReason::OutOfStock,
            toast: Toast::out_of_stock(&product.name),
        }),
        Availability::Unconfirmed => Err(Blocked {
            reason: BlockReason::Unconfirmed,
            toast: Toast::availability_unconfirmed(&product.name),
        }),
    }
}

/// Dispatch the add with the confirmed stock and return the resulting line.
fn add_confirmed(store: &Store, mut product: Product, quantity: u32) -> CartItem {
    product.stock = Some(quantity);
    let name = product.name.clone();
    store.dispatch(CartAction::Add(product.clone()));

    store
        .select(|state| {
            state
                .cart
                .items()
                .iter()
                .find(|line| line.name() == name)
                .cloned()
        })
        .unwrap_or_else(|| CartItem::first_unit(product))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::models::StockEntry;
    use crate::models::product::fixtures::product;
    use crate::models::user::fixtures::user;
    use crate::services::ToastLevel;
    use crate::store::{AccountAction, StockAction};

    fn status_error() -> StockApiError {
        StockApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        }
    }

    #[test]
    fn test_from_lookup() {
        assert_eq!(
            Availability::from_lookup(&Ok(StockLevel { quantity: 5 })),
            Availability::InStock(5)
        );
        assert_eq!(
            Availability::from_lookup(&Ok(StockLevel { quantity: 0 })),
            Availability::OutOfStock
        );
        assert_eq!(
            Availability::from_lookup(&Ok(StockLevel { quantity: -2 })),
            Availability::OutOfStock
        );
        assert_eq!(
            Availability::from_lookup(&Err(status_error())),
            Availability::Unconfirmed
        );
    }

    fn signed_in_store() -> Store {
        let store = Store::new();
        store.dispatch(AccountAction::SignIn(Box::new(user())));
        store
    }

    #[test]
    fn test_local_block_requires_sign_in() {
        let store = Store::new();
        let blocked = store
            .select(|state| local_block(state, &product(1, "Kettle", 3500)))
            .unwrap();
        assert_eq!(blocked.reason, BlockReason::SignInRequired);
        assert_eq!(blocked.toast.level, ToastLevel::Error);
    }

    #[test]
    fn test_local_block_uses_mirror_zero() {
        let store = signed_in_store();
        store.dispatch(StockAction::Refreshed(vec![
            StockEntry {
                name: "Kettle".to_string(),
                quantity: 0,
            },
            StockEntry {
                name: "Mug".to_string(),
                quantity: 2,
            },
        ]));

        let blocked = store
            .select(|state| local_block(state, &product(1, "Kettle", 3500)))
            .unwrap();
        assert_eq!(blocked.reason, BlockReason::OutOfStock);
        assert_eq!(blocked.toast, Toast::out_of_stock("Kettle"));

        assert!(store.select(|state| local_block(state, &product(2, "Mug", 1200))).is_none());
        // Unknown to the mirror: left to the live lookup
        assert!(store.select(|state| local_block(state, &product(3, "Tea", 450))).is_none());
    }

    #[test]
    fn test_add_confirmed_records_stock() {
        let store = Store::new();
        let line = add_confirmed(&store, product(3, "Kettle", 3500), 5);

        assert_eq!(line.quantity, 1);
        assert_eq!(line.product.stock, Some(5));
        let cart = store.select(|state| state.cart.items().to_vec());
        assert_eq!(cart[0].product.stock, Some(5));
    }

    #[test]
    fn test_availability_serializes_with_status_tag() {
        let json = serde_json::to_value(Availability::InStock(5)).unwrap();
        assert_eq!(json, serde_json::json!({"status": "in_stock", "quantity": 5}));
        let json = serde_json::to_value(Availability::OutOfStock).unwrap();
        assert_eq!(json, serde_json::json!({"status": "out_of_stock"}));
    }
}
