//! Cart ledger: ordered line items keyed by product name.

use serde::Serialize;

use shopfront_core::{CurrencyCode, Price};

use crate::models::{CartItem, Product};

/// Actions handled by the cart ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product.
    Add(Product),
    /// Remove the line at a position.
    RemoveAt(usize),
    /// Empty the cart.
    Clear,
}

/// The shopper's cart.
///
/// Holds at most one line per product name, in the order lines were first
/// added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CartLedger {
    items: Vec<CartItem>,
}

impl CartLedger {
    pub(crate) fn reduce(&mut self, action: CartAction) {
        match action {
            CartAction::Add(product) => self.add_or_increment(product),
            CartAction::RemoveAt(index) => self.remove_at(index),
            CartAction::Clear => self.items.clear(),
        }
    }

    /// Increment the line named like `product`, or append a new line with
    /// quantity 1.
    ///
    /// On increment the existing line keeps its product fields, except the
    /// confirmed stock, which is updated when the new product carries one.
    pub fn add_or_increment(&mut self, product: Product) {
        if let Some(line) = self.items.iter_mut().find(|line| line.name() == product.name) {
            line.quantity = line.quantity.saturating_add(1);
            if product.stock.is_some() {
                line.product.stock = product.stock;
            }
        } else {
            self.items.push(CartItem::first_unit(product));
        }
    }

    /// Remove the line at `index`. Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Move every line out, leaving the cart empty.
    pub(crate) fn take(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Sum of line prices.
    ///
    /// Returns `None` when lines are priced in different currencies or the
    /// total overflows. An empty cart totals zero in the default currency.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        let mut lines = self.items.iter().map(CartItem::line_price);
        let Some(first) = lines.next() else {
            return Some(Price::zero(CurrencyCode::default()));
        };
        lines.try_fold(first?, |total, line| total.checked_add(&line?))
    }
}
