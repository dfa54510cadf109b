//! Wiring of the two catalog stores.
//!
//! [`Catalogs`] owns one [`Store`] per catalog. Both stores share the data
//! source but nothing else; the presentation layer receives the whole
//! struct and talks to each store directly.

use crate::config::StockroomConfig;
use crate::model::LoadStatus;
use crate::inventory::{InventoryAction, InventoryEnvironment, InventoryReducer, InventoryState};
use crate::orders::{OrderAction, OrderEnvironment, OrderReducer, OrderState};
use crate::source::{source_for, DataSource};
use std::sync::Arc;
use std::time::Duration;
use stockroom_core::environment::{IdGenerator, SystemClock, TimestampIds};
use stockroom_runtime::{Store, StoreError};

/// Store hosting the order catalog
pub type OrderStore = Store<OrderState, OrderAction, OrderEnvironment, OrderReducer>;

/// Store hosting the inventory catalog
pub type InventoryStore =
    Store<InventoryState, InventoryAction, InventoryEnvironment, InventoryReducer>;

/// Both catalogs, ready to hand to a presentation layer
#[derive(Clone)]
pub struct Catalogs {
    /// The order catalog
    pub orders: OrderStore,
    /// The inventory catalog
    pub inventory: InventoryStore,
}

impl Catalogs {
    /// Build empty catalogs over a shared source
    #[must_use]
    pub fn new(
        source: Arc<dyn DataSource>,
        ids: Arc<dyn IdGenerator>,
        load_timeout: Duration,
    ) -> Self {
        let orders = Store::new(
            OrderState::new(),
            OrderReducer::new(),
            OrderEnvironment::new(Arc::clone(&source), load_timeout),
        );
        let inventory = Store::new(
            InventoryState::new(),
            InventoryReducer::new(),
            InventoryEnvironment::new(source, ids, load_timeout),
        );
        Self { orders, inventory }
    }

    /// Build catalogs for a configuration, with time-based item ids
    #[must_use]
    pub fn from_config(config: &StockroomConfig) -> Self {
        let ids = Arc::new(TimestampIds::new(Arc::new(SystemClock)));
        Self::new(source_for(&config.source), ids, config.load_timeout())
    }

    /// Load both catalogs and wait until each has applied its result
    ///
    /// Load failures do not make this return an error; they land in each
    /// catalog's `last_error` and `load_status`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if either store is
    /// shutting down.
    pub async fn load(&self) -> Result<(), StoreError> {
        let mut orders = self.orders.send(OrderAction::Load).await?;
        let mut inventory = self.inventory.send(InventoryAction::Load).await?;
        tokio::join!(orders.wait(), inventory.wait());
        Ok(())
    }

    /// Catalogs that have not loaded, each with the reason it recorded
    ///
    /// Empty once both catalogs hold a snapshot.
    pub async fn load_failures(&self) -> Vec<(&'static str, String)> {
        let orders = self
            .orders
            .state(|s| (s.load_status, s.last_error.clone()))
            .await;
        let inventory = self
            .inventory
            .state(|s| (s.load_status, s.last_error.clone()))
            .await;

        [("orders", orders), ("inventory", inventory)]
            .into_iter()
            .filter(|(_, (status, _))| *status != LoadStatus::Loaded)
            .map(|(catalog, (status, error))| {
                let reason = error.map_or_else(|| format!("{status:?}"), |e| e.to_string());
                (catalog, reason)
            })
            .collect()
    }

    /// Shut both stores down, waiting for in-flight loads
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        let (orders, inventory) = tokio::join!(
            self.orders.shutdown(Some(timeout)),
            self.inventory.shutdown(Some(timeout))
        );
        orders.and(inventory)
    }
}
