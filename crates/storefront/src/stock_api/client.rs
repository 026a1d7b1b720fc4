//! HTTP client for the stock API.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use shopfront_core::ProductId;

use super::{RemoteStockRecord, StockApiError, StockLevel};

/// Longest slice of a response body kept in logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for the remote stock API.
///
/// Makes exactly one request per call: no retries, no caching.
#[derive(Clone)]
pub struct StockClient {
    inner: Arc<StockClientInner>,
}

struct StockClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl StockClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8080`).
    ///
    /// Endpoint paths are resolved relative to the base, so a base with a
    /// path prefix (`https://host/backend`) keeps that prefix.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            inner: Arc::new(StockClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// The normalized base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Fetch the whole remote inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 200, or the
    /// body is not a JSON array of stock records.
    #[instrument(skip(self))]
    pub async fn get_all_stock(&self) -> Result<Vec<RemoteStockRecord>, StockApiError> {
        let url = self.inner.base_url.join("api/getAllStock")?;
        let records: Vec<RemoteStockRecord> = self.get_json(url).await?;
        debug!(count = records.len(), "Fetched stock listing");
        Ok(records)
    }

    /// Fetch the live stock level for one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 200, or the
    /// body has no integer `quantity`.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_stock(&self, id: ProductId) -> Result<StockLevel, StockApiError> {
        let mut url = self.inner.base_url.join("api/getStock")?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, StockApiError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Read as text first so failures can log what the backend sent
        let body = response.text().await?;
        let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();

        if status != reqwest::StatusCode::OK {
            tracing::warn!(status = %status, body = %preview, "Stock API returned non-200 status");
            return Err(StockApiError::Status {
                status,
                body: preview,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, body = %preview, "Failed to parse stock API response");
            StockApiError::Parse(e)
        })
    }
}
