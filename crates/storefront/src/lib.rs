//! Shopfront Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Architecture
//!
//! - [`store`] - Single in-memory state document mutated by reducers
//! - [`stock_api`] - HTTP client for the remote stock API
//! - [`services`] - Stock refresh and the cart availability gate
//! - [`routes`] - JSON API over the store (axum)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod stock_api;
pub mod store;
