//! State and actions of the order catalog.

use crate::error::{CatalogError, ValidationError};
use crate::model::{Item, ItemId, LoadStatus, Order, OrderId, OrderLine, OrderStatus};
use std::str::FromStr;
use stockroom_macros::Action;

/// Which orders the view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every order
    #[default]
    All,
    /// Only pending orders
    Pending,
    /// Only completed orders
    Completed,
}

impl StatusFilter {
    /// Every filter, in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Pending, Self::Completed];

    /// Whether an order with `status` passes this filter
    #[must_use]
    pub const fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => matches!(status, OrderStatus::Pending),
            Self::Completed => matches!(status, OrderStatus::Completed),
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownFilter(s.to_string()))
    }
}

/// Columns the order view can be sorted by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Customer name, lexicographic
    Customer,
    /// Total quantity across lines
    ItemCount,
}

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// The opposite direction
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient an ascending comparison
    #[must_use]
    pub const fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Current sort; no field means snapshot order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortCriteria {
    /// Column sorted by, if any
    pub field: Option<SortField>,
    /// Direction applied to `field`
    pub direction: SortDirection,
}

impl SortCriteria {
    /// Sort by `field` in `direction`
    #[must_use]
    pub const fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Result of clicking the `field` column
    ///
    /// Same field flips the direction; a different field starts ascending.
    #[must_use]
    pub fn toggled(self, field: SortField) -> Self {
        match self.field {
            Some(current) if current == field => Self::by(field, self.direction.flipped()),
            _ => Self::by(field, SortDirection::Asc),
        }
    }
}

/// Detail of the selected line, joined with inventory stock
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDetail {
    /// The order line
    pub line: OrderLine,
    /// Stock of the matching inventory item at load time, if one exists
    pub stock: Option<u32>,
}

/// State of the order catalog
#[derive(Clone, Debug, Default)]
pub struct OrderState {
    /// All orders, in snapshot order
    pub orders: Vec<Order>,
    /// Items from the same snapshot, used for line details
    pub reference_items: Vec<Item>,
    /// Active status filter
    pub status_filter: StatusFilter,
    /// Active sort
    pub sort: SortCriteria,
    /// Selected order
    pub selected_order: Option<OrderId>,
    /// Selected line within the selected order
    pub selected_line: Option<ItemId>,
    /// Load progress
    pub load_status: LoadStatus,
    /// Last rejected operation
    pub last_error: Option<CatalogError>,
}

impl OrderState {
    /// Creates an empty `OrderState`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loaded state holding `orders`
    #[must_use]
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders,
            load_status: LoadStatus::Loaded,
            ..Self::default()
        }
    }

    /// Number of orders regardless of filter
    #[must_use]
    pub fn count(&self) -> usize {
        self.orders.len()
    }

    /// Looks up an order by id
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Whether an order with this id exists
    #[must_use]
    pub fn exists(&self, id: &OrderId) -> bool {
        self.get(id).is_some()
    }

    /// The selected order, resolved against the current orders
    #[must_use]
    pub fn selected_order(&self) -> Option<&Order> {
        self.selected_order.as_ref().and_then(|id| self.get(id))
    }

    /// The selected line of the selected order
    #[must_use]
    pub fn selected_line(&self) -> Option<&OrderLine> {
        let id = self.selected_line?;
        self.selected_order()?.line(id)
    }

    /// The selected line, with stock looked up in the reference items
    #[must_use]
    pub fn item_detail(&self) -> Option<ItemDetail> {
        let line = self.selected_line()?;
        let stock = self
            .reference_items
            .iter()
            .find(|item| item.id == line.id)
            .map(|item| item.stock);
        Some(ItemDetail {
            line: line.clone(),
            stock,
        })
    }

    /// Orders passing the filter, in sort order
    #[must_use]
    pub fn derive_view(&self) -> Vec<Order> {
        super::view::derive_view(&self.orders, self.status_filter, self.sort)
    }
}

/// Actions of the order catalog
///
/// Commands come from the presentation layer; events are produced by the
/// load effect.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum OrderAction {
    // Commands
    /// Fetch the snapshot and replace the catalog contents
    #[command]
    Load,

    /// Change the status filter
    #[command]
    SetStatusFilter {
        /// New filter
        filter: StatusFilter,
    },

    /// Sort by a column, flipping direction if it is already active
    #[command]
    ToggleSort {
        /// Column clicked
        field: SortField,
    },

    /// Select an order and clear the line selection
    #[command]
    SelectOrder {
        /// Order to select
        id: OrderId,
    },

    /// Select a line of the selected order
    #[command]
    SelectLine {
        /// Item id of the line
        id: ItemId,
    },

    /// Return to the order list
    #[command]
    ClearOrderSelection,

    /// Close the line detail
    #[command]
    ClearLineSelection,

    /// Mark an order as completed
    #[command]
    MarkCompleted {
        /// Order to complete
        id: OrderId,
    },

    // Events
    /// The snapshot was fetched
    #[event]
    SnapshotLoaded {
        /// Orders from the snapshot
        orders: Vec<Order>,
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
