//! User domain types.

use serde::{Deserialize, Serialize};

use shopfront_core::{Email, UserId, UserRole};

use super::Order;

/// The signed-in shopper.
///
/// Authentication happens upstream; the storefront receives the user
/// document on sign-in and mutates it in place afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Order history, oldest first. Present (possibly empty) for every user,
    /// including ones deserialized from payloads that omit it.
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// How the user pays at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card { brand: String, last4: String },
    CashOnDelivery,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    use shopfront_core::{Email, UserId, UserRole};

    use super::User;

    /// A signed-in customer with no address, payment method or orders.
    pub fn user() -> User {
        User {
            id: UserId::new(1),
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            role: UserRole::Customer,
            address: None,
            payment_method: None,
            orders: Vec::new(),
        }
    }
}
