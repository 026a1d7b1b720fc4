//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::stock_api::StockClient;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// state store, the stock API client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Store,
    stock: StockClient,
}

impl AppState {
    /// Create a new application state with an empty store.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let stock = StockClient::new(&config.stock_api_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Store::new(),
                stock,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the state store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the stock API client.
    #[must_use]
    pub fn stock(&self) -> &StockClient {
        &self.inner.stock
    }
}
