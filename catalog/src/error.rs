//! Error types for catalog operations.
//!
//! Catalog operations never fail through a `Result`: a rejected command
//! leaves state untouched and records one of these in the catalog's
//! `last_error`, where the presentation layer can surface it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input rejected before it reached the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// Item name is empty or whitespace
    #[error("Item name cannot be empty")]
    EmptyName,

    /// Stock field is empty or whitespace
    #[error("Stock cannot be empty")]
    EmptyStock,

    /// Stock is not a non-negative whole number
    #[error("Stock must be a non-negative whole number, got {0:?}")]
    InvalidStock(String),

    /// Filter label did not name a known filter
    #[error("Unknown filter {0:?}")]
    UnknownFilter(String),
}

/// Kind of record a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    /// A purchase order
    Order,
    /// A line within the selected order
    OrderLine,
    /// An inventory item
    Item,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Order => f.write_str("Order"),
            Self::OrderLine => f.write_str("Order line"),
            Self::Item => f.write_str("Item"),
        }
    }
}

/// Errors recorded by the catalogs
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogError {
    /// The data source could not produce a snapshot
    #[error("Failed to load catalog: {0}")]
    LoadFailed(String),

    /// User input was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An operation named an id that is not present
    #[error("{entity} {id} not found")]
    ReferenceMiss {
        /// What was looked up
        entity: Entity,
        /// The id that missed
        id: String,
    },

    /// A line was selected while no order was selected
    #[error("No order is selected")]
    NoOrderSelected,

    /// An edit operation arrived while no item was being edited
    #[error("No item is being edited")]
    NotEditing,

    /// Every item id above the existing ones is taken
    #[error("No item ids left to assign")]
    IdsExhausted,
}

impl CatalogError {
    /// Builds a [`CatalogError::ReferenceMiss`]
    pub fn missing(entity: Entity, id: impl std::fmt::Display) -> Self {
        Self::ReferenceMiss {
            entity,
            id: id.to_string(),
        }
    }
}
