//! Client for the remote stock API.
//!
//! # Endpoints
//!
//! ```text
//! GET /api/getAllStock      -> [{ "name": ..., "quantity": ..., ... }]
//! GET /api/getStock?id=<id> -> { "quantity": ... }
//! ```
//!
//! The remote service is the source of truth for inventory. Responses are
//! not cached here; the [`StockMirror`](crate::store::StockMirror) is the
//! only local copy.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::stock_api::StockClient;
//!
//! let client = StockClient::new(&config.stock_api_url);
//! let records = client.get_all_stock().await?;
//! let level = client.get_stock(ProductId::new(7)).await?;
//! ```

mod client;
pub mod types;

pub use client::StockClient;
pub use types::{RemoteStockRecord, StockLevel};

use thiserror::Error;

/// Errors that can occur when talking to the stock API.
#[derive(Debug, Error)]
pub enum StockApiError {
    /// HTTP request failed (connection refused, reset, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with something other than 200.
    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
