//! CLI command implementations.

pub mod stock;
