//! Domain models for the storefront.
//!
//! These are the documents held by the [`Store`](crate::store::Store):
//! catalog products, cart line items, stock entries, orders and the
//! signed-in user.

pub mod order;
pub mod product;
pub mod user;

pub use order::Order;
pub use product::{CartItem, Product, StockEntry};
pub use user::{Address, PaymentMethod, User};
