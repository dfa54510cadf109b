//! Domain types shared by both catalogs.
//!
//! These are the records carried by a [`Snapshot`]: orders with their lines,
//! and inventory items. All of them are plain owned values; catalogs replace
//! records instead of mutating them through shared references.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Identifier of a purchase order (for example `"O1"`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates an `OrderId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Identifier of an inventory item
///
/// Order lines reuse the id of the item they refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an `ItemId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Fulfilment status of an order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Not yet fulfilled
    Pending,
    /// Fulfilled
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.pad("Pending"),
            Self::Completed => f.pad("Completed"),
        }
    }
}

/// One line of an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Id of the referenced item (not enforced)
    pub id: ItemId,
    /// Display name of the item
    pub name: String,
    /// Ordered quantity
    pub quantity: u32,
}

impl OrderLine {
    /// Creates an order line
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
        }
    }
}

/// A purchase order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// Customer name
    pub customer: String,
    /// Fulfilment status
    pub status: OrderStatus,
    /// Ordered lines
    pub items: Vec<OrderLine>,
}

impl Order {
    /// Creates an order
    #[must_use]
    pub fn new(
        id: OrderId,
        customer: impl Into<String>,
        status: OrderStatus,
        items: Vec<OrderLine>,
    ) -> Self {
        Self {
            id,
            customer: customer.into(),
            status,
            items,
        }
    }

    /// Total quantity across all lines
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Returns the line referring to the given item, if any
    #[must_use]
    pub fn line(&self, id: ItemId) -> Option<&OrderLine> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Returns a copy of this order with `status` set to `Completed`
    #[must_use]
    pub fn completed(&self) -> Self {
        Self {
            status: OrderStatus::Completed,
            ..self.clone()
        }
    }
}

/// An inventory item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Units on hand
    pub stock: u32,
}

impl Item {
    /// Creates an item
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
        }
    }

    /// Whether at least one unit is on hand
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Integrity problems that make a snapshot unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Two orders share an id
    #[error("duplicate order id {0}")]
    DuplicateOrderId(OrderId),

    /// Two items share an id
    #[error("duplicate item id {0}")]
    DuplicateItemId(ItemId),

    /// Two lines of one order refer to the same item
    #[error("order {order} has more than one line for item {line}")]
    DuplicateLineId {
        /// Order holding the lines
        order: OrderId,
        /// Item id repeated across its lines
        line: ItemId,
    },
}

/// Everything a data source provides at load time
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All purchase orders
    pub orders: Vec<Order>,
    /// All inventory items
    pub items: Vec<Item>,
}

impl Snapshot {
    /// Creates a snapshot from its two collections
    #[must_use]
    pub const fn new(orders: Vec<Order>, items: Vec<Item>) -> Self {
        Self { orders, items }
    }

    /// Checks that order ids, item ids and line ids within an order are unique
    ///
    /// Lines are selected by item id, so an order may hold at most one line
    /// per item.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut order_ids = HashSet::with_capacity(self.orders.len());
        for order in &self.orders {
            if !order_ids.insert(&order.id) {
                return Err(SnapshotError::DuplicateOrderId(order.id.clone()));
            }

            let mut line_ids = HashSet::with_capacity(order.items.len());
            if let Some(line) = order.items.iter().find(|line| !line_ids.insert(line.id)) {
                return Err(SnapshotError::DuplicateLineId {
                    order: order.id.clone(),
                    line: line.id,
                });
            }
        }

        let mut item_ids = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !item_ids.insert(item.id) {
                return Err(SnapshotError::DuplicateItemId(item.id));
            }
        }

        Ok(())
    }
}

/// Progress of a catalog's one-time load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// No load requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Snapshot applied
    Loaded,
    /// Fetch failed; the catalog kept its prior contents
    Failed,
}
