//! The inventory catalog.
//!
//! Items can be added from a draft form, edited through a working copy, and
//! deleted. The view filters by stock level and keeps catalog order.

pub mod reducer;
pub mod types;
pub mod view;

pub use reducer::{InventoryEnvironment, InventoryReducer};
pub use types::{
    parse_stock, validate_name, DraftField, InventoryAction, InventoryState, ItemDraft, StockFilter,
};
