//! # Stockroom
//!
//! Client-side data management for purchase orders and inventory items.
//!
//! Two catalogs are loaded once from a [`source::DataSource`] snapshot and
//! then filtered, sorted, inspected and mutated in memory:
//!
//! - [`orders`]: status filter, two-column sort, order and line selection,
//!   mark-as-completed
//! - [`inventory`]: stock filter, add, edit through a working copy, delete
//!
//! Each catalog is a reducer hosted by its own `Store`; [`app::Catalogs`]
//! builds both.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use stockroom::app::Catalogs;
//! use stockroom::source::JsonFileSource;
//! use stockroom_core::environment::{SystemClock, TimestampIds};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let catalogs = Catalogs::new(
//!     Arc::new(JsonFileSource::new("data/data.json")),
//!     Arc::new(TimestampIds::new(Arc::new(SystemClock))),
//!     Duration::from_secs(10),
//! );
//! catalogs.load().await?;
//!
//! let pending = catalogs.orders.state(|s| s.derive_view()).await;
//! println!("{} orders", pending.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod orders;
pub mod source;

pub use app::Catalogs;
pub use config::StockroomConfig;
pub use error::{CatalogError, Entity, ValidationError};
pub use model::{
    Item, ItemId, LoadStatus, Order, OrderId, OrderLine, OrderStatus, Snapshot, SnapshotError,
};
pub use source::{DataSource, SourceError};
