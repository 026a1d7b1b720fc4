//! Product, cart line and stock entry types.

use serde::{Deserialize, Serialize};

use shopfront_core::{Price, ProductId};

/// A catalog product as shown in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Display name. Also the identity key of a cart line.
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Remote stock confirmed by the availability check when the product
    /// was added to the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

/// A cart line: the product fields plus how many units are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Start a new line with a single unit of `product`.
    #[must_use]
    pub const fn first_unit(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The key lines are merged on.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// Unit price times quantity. `None` if the amount overflows.
    #[must_use]
    pub fn line_price(&self) -> Option<Price> {
        self.product.price.checked_times(self.quantity)
    }
}

/// One row of the stock mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub name: String,
    pub quantity: u32,
}
