//! Business logic services for storefront.
//!
//! Services sit between the HTTP routes and the [`Store`](crate::store::Store):
//! they perform the network calls and translate the outcome into actions.
//!
//! # Services
//!
//! - `inventory` - Refresh the stock mirror from the remote listing
//! - `availability` - Gate cart additions on live remote stock
//! - `notifications` - Toast messages surfaced to the shopper

pub mod availability;
pub mod inventory;
pub mod notifications;

pub use availability::{Availability, BlockReason, Blocked};
pub use notifications::{Toast, ToastLevel};
