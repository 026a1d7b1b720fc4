//! Client state store.
//!
//! A single in-memory document ([`RootState`]) that only changes through
//! [`Store::dispatch`]. Each slice owns a synchronous reducer; reducers never
//! perform I/O, so anything random or time-dependent (order references,
//! timestamps) is decided by the caller and carried in the action.
//!
//! # Slices
//!
//! - [`StockMirror`] - projection of remote inventory
//! - [`CartLedger`] - line items keyed by product name
//! - [`AccountState`] - signed-in user and order history

mod account;
mod cart;
mod stock;

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use shopfront_core::OrderRef;

pub use account::{AccountAction, AccountState};
pub use cart::{CartAction, CartLedger};
pub use stock::{StockAction, StockMirror};

use crate::models::Order;

/// Every state transition the storefront knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Stock(StockAction),
    Cart(CartAction),
    Account(AccountAction),
    /// Snapshot the cart into the user's order history and empty the cart.
    Checkout {
        reference: OrderRef,
        placed_at: DateTime<Utc>,
    },
}

impl Action {
    /// Short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Stock(StockAction::RefreshStarted) => "stock/refresh_started",
            Self::Stock(StockAction::Refreshed(_)) => "stock/refreshed",
            Self::Stock(StockAction::RefreshFinished) => "stock/refresh_finished",
            Self::Cart(CartAction::Add(_)) => "cart/add",
            Self::Cart(CartAction::RemoveAt(_)) => "cart/remove_at",
            Self::Cart(CartAction::Clear) => "cart/clear",
            Self::Account(AccountAction::SignIn(_)) => "account/sign_in",
            Self::Account(AccountAction::SignOut) => "account/sign_out",
            Self::Account(AccountAction::UpdateProfile { .. }) => "account/update_profile",
            Self::Account(AccountAction::SetRole(_)) => "account/set_role",
            Self::Account(AccountAction::SetAddress(_)) => "account/set_address",
            Self::Account(AccountAction::SetPaymentMethod(_)) => "account/set_payment_method",
            Self::Account(AccountAction::AddOrder(_)) => "account/add_order",
            Self::Account(AccountAction::DeleteOrder(_)) => "account/delete_order",
            Self::Checkout { .. } => "checkout",
        }
    }
}

impl From<StockAction> for Action {
    fn from(action: StockAction) -> Self {
        Self::Stock(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Self::Cart(action)
    }
}

impl From<AccountAction> for Action {
    fn from(action: AccountAction) -> Self {
        Self::Account(action)
    }
}

/// The whole storefront document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootState {
    pub stock: StockMirror,
    pub cart: CartLedger,
    pub account: AccountState,
}

impl RootState {
    /// Apply one action.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Stock(action) => self.stock.reduce(action),
            Action::Cart(action) => self.cart.reduce(action),
            Action::Account(action) => self.account.reduce(action),
            Action::Checkout {
                reference,
                placed_at,
            } => self.checkout(reference, placed_at),
        }
    }

    /// Move the cart into the order history as one order.
    ///
    /// The cart is emptied even when nobody is signed in, in which case the
    /// order is discarded.
    fn checkout(&mut self, reference: OrderRef, placed_at: DateTime<Utc>) {
        let order = Order {
            reference,
            placed_at,
            items: self.cart.take(),
        };
        self.account.reduce(AccountAction::AddOrder(order));
    }
}

/// Shared handle to the storefront state.
///
/// Cheaply cloneable; all clones see the same document.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<RootState>>,
}

impl Store {
    /// Create a store with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` through the reducers.
    pub fn dispatch(&self, action: impl Into<Action>) {
        let action = action.into();
        debug!(action = action.name(), "dispatch");
        // Reducers hold no invariants across a panic, so a poisoned lock is
        // still safe to use.
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .reduce(action);
    }

    /// Run `action` only if `guard` holds for the current state.
    ///
    /// The guard and the reduction happen under one write lock, so no other
    /// dispatch can slip in between. Returns whether the action ran.
    pub fn dispatch_if(
        &self,
        action: impl Into<Action>,
        guard: impl FnOnce(&RootState) -> bool,
    ) -> bool {
        let action = action.into();
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !guard(&state) {
            debug!(action = action.name(), "dispatch skipped");
            return false;
        }
        debug!(action = action.name(), "dispatch");
        state.reduce(action);
        true
    }

    /// Read a value out of the current state.
    pub fn select<T>(&self, selector: impl FnOnce(&RootState) -> T) -> T {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        selector(&state)
    }

    /// Clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> RootState {
        self.select(Clone::clone)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::models::StockEntry;
    use crate::models::product::fixtures::product;
    use crate::models::user::fixtures::user;

    fn checkout_now() -> (OrderRef, Action) {
        let reference = OrderRef::generate();
        (
            reference,
            Action::Checkout {
                reference,
                placed_at: Utc::now(),
            },
        )
    }

    #[test]
    fn test_checkout_moves_cart_into_history() {
        let store = Store::new();
        store.dispatch(AccountAction::SignIn(Box::new(user())));
        store.dispatch(CartAction::Add(product(1, "Mug", 1200)));
        store.dispatch(CartAction::Add(product(1, "Mug", 1200)));
        store.dispatch(CartAction::Add(product(2, "Tea", 450)));

        let (reference, checkout) = checkout_now();
        store.dispatch(checkout);

        let state = store.snapshot();
        assert!(state.cart.is_empty());
        let orders = state.account.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].reference, reference);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].items[0].quantity, 2);
    }

    #[test]
    fn test_checkout_empties_cart_without_user() {
        let store = Store::new();
        store.dispatch(CartAction::Add(product(1, "Mug", 1200)));
        store.dispatch(checkout_now().1);

        assert!(store.select(|state| state.cart.is_empty()));
        assert!(store.select(|state| state.account.orders().is_empty()));
    }

    #[test]
    fn test_checkout_of_empty_cart_still_clears() {
        let store = Store::new();
        store.dispatch(AccountAction::SignIn(Box::new(user())));
        store.dispatch(checkout_now().1);
        store.dispatch(checkout_now().1);

        let state = store.snapshot();
        assert!(state.cart.is_empty());
        assert_eq!(state.account.orders().len(), 2);
    }

    #[test]
    fn test_dispatch_if_skips_when_guard_fails() {
        let store = Store::new();
        store.dispatch(AccountAction::SignIn(Box::new(user())));

        let ran = store.dispatch_if(checkout_now().1, |state| !state.cart.is_empty());
        assert!(!ran);
        assert!(store.select(|state| state.account.orders().is_empty()));

        store.dispatch(CartAction::Add(product(1, "Mug", 1200)));
        let ran = store.dispatch_if(checkout_now().1, |state| !state.cart.is_empty());
        assert!(ran);
        assert_eq!(store.select(|state| state.account.orders().len()), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = Store::new();
        let other = store.clone();
        other.dispatch(StockAction::Refreshed(vec![StockEntry {
            name: "A".to_string(),
            quantity: 3,
        }]));

        assert_eq!(store.select(|state| state.stock.quantity_of("A")), Some(3));
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::from(CartAction::Clear).name(), "cart/clear");
        assert_eq!(checkout_now().1.name(), "checkout");
    }
}
