//! Toast notifications.

use serde::Serialize;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

/// A short message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn added_to_cart(product_name: &str) -> Self {
        Self {
            level: ToastLevel::Info,
            message: format!("{product_name} added to cart"),
        }
    }

    #[must_use]
    pub fn sign_in_required() -> Self {
        Self {
            level: ToastLevel::Error,
            message: "Please sign in to add items to your cart".to_string(),
        }
    }

    #[must_use]
    pub fn out_of_stock(product_name: &str) -> Self {
        Self {
            level: ToastLevel::Warning,
            message: format!("{product_name} is out of stock"),
        }
    }

    #[must_use]
    pub fn availability_unconfirmed(product_name: &str) -> Self {
        Self {
            level: ToastLevel::Error,
            message: format!("Couldn't confirm {product_name} is in stock. Please try again."),
        }
    }
}
