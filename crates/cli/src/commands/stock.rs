//! Stock API commands.
//!
//! Output goes to stdout as JSON so it can be piped into `jq`; logs go to
//! stderr.

use thiserror::Error;
use url::Url;

use shopfront_core::ProductId;
use shopfront_storefront::models::StockEntry;
use shopfront_storefront::services::{Availability, availability};
use shopfront_storefront::stock_api::{StockApiError, StockClient};

/// Errors that can occur during stock commands.
#[derive(Debug, Error)]
pub enum StockCommandError {
    /// No API URL given on the command line or in the environment.
    #[error("Missing stock API URL: pass --api-url or set STOCK_API_URL")]
    MissingApiUrl,

    /// The stock API call failed.
    #[error("Stock API error: {0}")]
    Api(#[from] StockApiError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stock API could not confirm availability.
    #[error("Could not confirm availability of product {0}")]
    Unconfirmed(ProductId),
}

/// Print the projected stock listing.
///
/// # Errors
///
/// Returns an error if the stock API call fails.
pub async fn list(api_url: &Url) -> Result<(), StockCommandError> {
    let client = StockClient::new(api_url);
    let entries: Vec<StockEntry> = client
        .get_all_stock()
        .await?
        .into_iter()
        .map(StockEntry::from)
        .collect();

    tracing::info!(count = entries.len(), "Fetched stock listing");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    Ok(())
}

/// Print the availability verdict for one product.
///
/// # Errors
///
/// Returns an error when availability cannot be confirmed, so the exit code
/// distinguishes "out of stock" (0, printed) from "unknown" (1).
pub async fn check(api_url: &Url, id: i64) -> Result<(), StockCommandError> {
    let client = StockClient::new(api_url);
    let product_id = ProductId::new(id);

    let verdict = availability::check(&client, product_id).await;
    if verdict == Availability::Unconfirmed {
        return Err(StockCommandError::Unconfirmed(product_id));
    }

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string(&verdict)?);
    }

    Ok(())
}
