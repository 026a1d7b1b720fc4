//! Wire types for the stock API.

use serde::Deserialize;

use crate::models::StockEntry;

/// One record from `GET /api/getAllStock`.
///
/// The backend sends whole inventory documents; only `name` and `quantity`
/// are kept when projecting into the mirror.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteStockRecord {
    pub name: String,
    pub quantity: i64,
}

impl From<RemoteStockRecord> for StockEntry {
    fn from(record: RemoteStockRecord) -> Self {
        Self {
            name: record.name,
            quantity: clamp_quantity(record.quantity),
        }
    }
}

/// Body of `GET /api/getStock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StockLevel {
    pub quantity: i64,
}

impl StockLevel {
    /// Units available to sell. Negative counts read as none.
    #[must_use]
    pub fn available(&self) -> u32 {
        clamp_quantity(self.quantity)
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}
