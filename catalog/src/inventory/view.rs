//! Derived inventory view.

use super::types::StockFilter;
use crate::model::Item;

/// Items passing `filter`, in catalog order
#[must_use]
pub fn derive_view(items: &[Item], filter: StockFilter) -> Vec<Item> {
    items
        .iter()
        .filter(|item| filter.matches(item.stock))
        .cloned()
        .collect()
}
