//! Stock mirror refresh.

use tracing::{info, instrument, warn};

use crate::models::StockEntry;
use crate::stock_api::{StockApiError, StockClient};
use crate::store::{StockAction, Store};

/// Replace the stock mirror with the current remote listing.
///
/// The loading flag is raised for the duration of the request and lowered
/// whatever the outcome. On failure the previous mirror is left in place and
/// the error is logged; there is no retry.
///
/// Returns the number of mirrored entries.
///
/// # Errors
///
/// Returns the stock API error after logging it, for callers that want to
/// report it (the HTTP routes ignore it).
#[instrument(skip_all)]
pub async fn refresh_stock(client: &StockClient, store: &Store) -> Result<usize, StockApiError> {
    store.dispatch(StockAction::RefreshStarted);

    let result = client.get_all_stock().await.map(|records| {
        let entries: Vec<StockEntry> = records.into_iter().map(StockEntry::from).collect();
        let count = entries.len();
        store.dispatch(StockAction::Refreshed(entries));
        count
    });

    store.dispatch(StockAction::RefreshFinished);

    match &result {
        Ok(count) => info!(count, "Stock mirror refreshed"),
        Err(e) => warn!(error = %e, "Stock refresh failed; keeping previous mirror"),
    }

    result
}
