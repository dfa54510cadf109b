//! State and actions of the inventory catalog.

use crate::error::{CatalogError, ValidationError};
use crate::model::{Item, ItemId, LoadStatus};
use std::str::FromStr;
use stockroom_macros::Action;

/// Which items the view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StockFilter {
    /// Every item
    #[default]
    All,
    /// Items with stock above zero
    InStock,
    /// Items with zero stock
    OutOfStock,
}

impl StockFilter {
    /// Every filter, in display order
    pub const ALL: [Self; 3] = [Self::All, Self::InStock, Self::OutOfStock];

    /// Whether an item with `stock` units passes this filter
    #[must_use]
    pub const fn matches(self, stock: u32) -> bool {
        match self {
            Self::All => true,
            Self::InStock => stock > 0,
            Self::OutOfStock => stock == 0,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl FromStr for StockFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownFilter(s.to_string()))
    }
}

/// Parse a stock quantity typed by the user
///
/// Leading and trailing whitespace is ignored. Negative, fractional and
/// non-numeric input is rejected.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyStock`] for blank input and
/// [`ValidationError::InvalidStock`] for anything that is not a `u32`.
pub fn parse_stock(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyStock);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidStock(trimmed.to_string()))
}

/// Validate a user-supplied item name, returning it trimmed
///
/// # Errors
///
/// Returns [`ValidationError::EmptyName`] for blank input.
pub fn validate_name(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Field of the add-item form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// Item name
    Name,
    /// Stock, as typed
    Stock,
}

/// Contents of the add-item form, kept as raw text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemDraft {
    /// Name as typed
    pub name: String,
    /// Stock as typed
    pub stock: String,
}

impl ItemDraft {
    /// Set one field
    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Name => self.name = value,
            DraftField::Stock => self.stock = value,
        }
    }

    /// Validated name and stock
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation, name first.
    pub fn validate(&self) -> Result<(String, u32), ValidationError> {
        let name = validate_name(&self.name)?;
        let stock = parse_stock(&self.stock)?;
        Ok((name, stock))
    }
}

/// State of the inventory catalog
#[derive(Clone, Debug, Default)]
pub struct InventoryState {
    /// All items, in snapshot then insertion order
    pub items: Vec<Item>,
    /// Active stock filter
    pub stock_filter: StockFilter,
    /// Working copy of the item being edited
    pub editing: Option<Item>,
    /// Add-item form contents
    pub draft: ItemDraft,
    /// Load progress
    pub load_status: LoadStatus,
    /// Last rejected operation
    pub last_error: Option<CatalogError>,
}

impl InventoryState {
    /// Creates an empty `InventoryState`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loaded state holding `items`
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            load_status: LoadStatus::Loaded,
            ..Self::default()
        }
    }

    /// Number of items regardless of filter
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Looks up an item by id
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether an item with this id exists
    #[must_use]
    pub fn exists(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Whether an edit session is open
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Smallest id that is at least `candidate` and above every existing id
    ///
    /// Returns `None` once an item holds `u64::MAX`.
    #[must_use]
    pub fn fresh_id(&self, candidate: u64) -> Option<ItemId> {
        let floor = self.items.iter().try_fold(0u64, |floor, item| {
            item.id.get().checked_add(1).map(|next| floor.max(next))
        })?;
        Some(ItemId::new(candidate.max(floor)))
    }

    /// Items passing the filter, in catalog order
    #[must_use]
    pub fn derive_view(&self) -> Vec<Item> {
        super::view::derive_view(&self.items, self.stock_filter)
    }
}

/// Actions of the inventory catalog
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum InventoryAction {
    // Commands
    /// Fetch the snapshot and replace the catalog contents
    #[command]
    Load,

    /// Change the stock filter
    #[command]
    SetStockFilter {
        /// New filter
        filter: StockFilter,
    },

    /// Update one field of the add-item form
    #[command]
    DraftChanged {
        /// Field typed into
        field: DraftField,
        /// Full new contents of the field
        value: String,
    },

    /// Add an item from the form contents
    #[command]
    AddItem,

    /// Open an edit session on an item
    #[command]
    BeginEdit {
        /// Item to edit
        id: ItemId,
    },

    /// Change the working copy's name
    #[command]
    EditName {
        /// New name, as typed
        value: String,
    },

    /// Change the working copy's stock
    #[command]
    EditStock {
        /// New stock, as typed
        value: String,
    },

    /// Write the working copy back to the catalog
    #[command]
    CommitEdit,

    /// Discard the working copy
    #[command]
    CancelEdit,

    /// Remove an item
    #[command]
    DeleteItem {
        /// Item to remove
        id: ItemId,
    },

    // Events
    /// The snapshot was fetched
    #[event]
    SnapshotLoaded {
        /// Items from the snapshot
        items: Vec<Item>,
    },

    /// The fetch failed
    #[event]
    LoadFailed {
        /// Error message
        error: String,
    },
}
