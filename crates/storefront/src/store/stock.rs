//! Stock mirror: the local copy of remote inventory.

use serde::Serialize;

use crate::models::StockEntry;

/// Actions handled by the stock mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockAction {
    /// A refresh request has been sent.
    RefreshStarted,
    /// A full remote listing arrived; replaces every entry.
    Refreshed(Vec<StockEntry>),
    /// The refresh ended, successfully or not.
    RefreshFinished,
}

/// Local projection of the remote stock listing.
///
/// Replaced wholesale on each successful refresh. Until a refresh completes
/// the previous entries stay visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StockMirror {
    entries: Vec<StockEntry>,
    loading: bool,
}

impl StockMirror {
    pub(crate) fn reduce(&mut self, action: StockAction) {
        match action {
            StockAction::RefreshStarted => self.loading = true,
            StockAction::Refreshed(entries) => self.refresh(entries),
            StockAction::RefreshFinished => self.loading = false,
        }
    }

    /// Replace the mirror with `entries`. No merge with previous contents.
    pub fn refresh(&mut self, entries: Vec<StockEntry>) {
        self.entries = entries;
    }

    #[must_use]
    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mirrored quantity for a product name, if the mirror knows it.
    #[must_use]
    pub fn quantity_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, quantity: u32) -> StockEntry {
        StockEntry {
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_refresh_replaces_everything() {
        let mut mirror = StockMirror::default();
        mirror.reduce(StockAction::Refreshed(vec![entry("A", 1), entry("B", 2)]));
        mirror.reduce(StockAction::Refreshed(vec![entry("C", 9)]));

        assert_eq!(mirror.entries(), &[entry("C", 9)]);
        assert_eq!(mirror.quantity_of("A"), None);
        assert_eq!(mirror.quantity_of("C"), Some(9));
    }

    #[test]
    fn test_loading_flag_brackets_refresh() {
        let mut mirror = StockMirror::default();
        mirror.reduce(StockAction::Refreshed(vec![entry("A", 3)]));

        mirror.reduce(StockAction::RefreshStarted);
        assert!(mirror.is_loading());
        // Previous entries remain visible while loading.
        assert_eq!(mirror.quantity_of("A"), Some(3));

        mirror.reduce(StockAction::RefreshFinished);
        assert!(!mirror.is_loading());
        assert_eq!(mirror.quantity_of("A"), Some(3));
    }
}
