//! Account slice: the signed-in user and their order history.

use serde::Serialize;
use tracing::debug;

use shopfront_core::{Email, UserRole};

use crate::models::{Address, Order, PaymentMethod, User};

/// Actions handled by the account slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAction {
    SignIn(Box<User>),
    SignOut,
    UpdateProfile {
        name: Option<String>,
        email: Option<Email>,
    },
    SetRole(UserRole),
    SetAddress(Address),
    SetPaymentMethod(PaymentMethod),
    AddOrder(Order),
    /// Remove the order at a position in the history.
    DeleteOrder(usize),
}

/// Holds the current user, if anyone is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountState {
    user: Option<User>,
}

impl AccountState {
    pub(crate) fn reduce(&mut self, action: AccountAction) {
        match action {
            AccountAction::SignIn(user) => self.user = Some(*user),
            AccountAction::SignOut => self.user = None,
            AccountAction::UpdateProfile { name, email } => {
                if let Some(user) = self.user.as_mut() {
                    if let Some(name) = name {
                        user.name = name;
                    }
                    if let Some(email) = email {
                        user.email = email;
                    }
                }
            }
            AccountAction::SetRole(role) => {
                if let Some(user) = self.user.as_mut() {
                    user.role = role;
                }
            }
            AccountAction::SetAddress(address) => {
                if let Some(user) = self.user.as_mut() {
                    user.address = Some(address);
                }
            }
            AccountAction::SetPaymentMethod(method) => {
                if let Some(user) = self.user.as_mut() {
                    user.payment_method = Some(method);
                }
            }
            AccountAction::AddOrder(order) => self.add_order(order),
            AccountAction::DeleteOrder(index) => self.delete_order(index),
        }
    }

    /// The order list of the signed-in user.
    ///
    /// Every order mutation goes through here, so adding and deleting share
    /// the same "no user, no order list" rule.
    fn orders_mut(&mut self) -> Option<&mut Vec<Order>> {
        let orders = self.user.as_mut().map(|user| &mut user.orders);
        if orders.is_none() {
            debug!("No signed-in user; order history unchanged");
        }
        orders
    }

    fn add_order(&mut self, order: Order) {
        if let Some(orders) = self.orders_mut() {
            orders.push(order);
        }
    }

    fn delete_order(&mut self, index: usize) {
        if let Some(orders) = self.orders_mut()
            && index < orders.len()
        {
            orders.remove(index);
        }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Order history of the signed-in user; empty when signed out.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.user
            .as_ref()
            .map(|user| user.orders.as_slice())
            .unwrap_or_default()
    }
}
