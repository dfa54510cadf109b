//! Reducer logic for the order catalog.
//!
//! Commands are validated against the current state; a rejected command
//! leaves the catalog unchanged and records the reason in `last_error`.

use super::types::{OrderAction, OrderState};
use crate::error::{CatalogError, Entity};
use crate::model::{ItemId, LoadStatus, OrderId, OrderStatus};
use crate::source::{load_effect, DataSource};
use std::sync::Arc;
use std::time::Duration;
use stockroom_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the order reducer
#[derive(Clone)]
pub struct OrderEnvironment {
    /// Where the snapshot comes from
    pub source: Arc<dyn DataSource>,
    /// Upper bound on a single fetch
    pub load_timeout: Duration,
}

impl OrderEnvironment {
    /// Creates a new `OrderEnvironment`
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, load_timeout: Duration) -> Self {
        Self {
            source,
            load_timeout,
        }
    }
}

/// Reducer for the order catalog
#[derive(Clone, Debug, Default)]
pub struct OrderReducer;

impl OrderReducer {
    /// Creates a new `OrderReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_select_order(state: &OrderState, id: &OrderId) -> Result<(), CatalogError> {
        if !state.exists(id) {
            return Err(CatalogError::missing(Entity::Order, id));
        }
        Ok(())
    }

    fn validate_select_line(state: &OrderState, id: ItemId) -> Result<(), CatalogError> {
        let Some(order) = state.selected_order() else {
            return Err(CatalogError::NoOrderSelected);
        };
        if order.line(id).is_none() {
            return Err(CatalogError::missing(Entity::OrderLine, id));
        }
        Ok(())
    }

    fn reject(state: &mut OrderState, action: &'static str, error: CatalogError) {
        tracing::warn!(action, error = %error, "Order command rejected");
        state.last_error = Some(error);
    }
}

impl Reducer for OrderReducer {
    type State = OrderState;
    type Action = OrderAction;
    type Environment = OrderEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let name = action.name();
        tracing::debug!(action = name, "Reducing order action");

        if action.is_command() {
            state.last_error = None;
        }

        match action {
            // ========== Commands ==========
            OrderAction::Load => {
                if state.load_status == LoadStatus::Loading {
                    tracing::debug!("Order load already in flight");
                    return SmallVec::new();
                }
                state.load_status = LoadStatus::Loading;
                tracing::info!(source = %env.source.describe(), "Loading orders");

                smallvec![load_effect(
                    Arc::clone(&env.source),
                    env.load_timeout,
                    |snapshot| OrderAction::SnapshotLoaded {
                        orders: snapshot.orders,
                        items: snapshot.items,
                    },
                    |error| OrderAction::LoadFailed { error },
                )]
            }

            OrderAction::SetStatusFilter { filter } => {
                state.status_filter = filter;
                SmallVec::new()
            }

            OrderAction::ToggleSort { field } => {
                state.sort = state.sort.toggled(field);
                SmallVec::new()
            }

            OrderAction::SelectOrder { id } => {
                if let Err(error) = Self::validate_select_order(state, &id) {
                    Self::reject(state, name, error);
                    return SmallVec::new();
                }
                state.selected_order = Some(id);
                state.selected_line = None;
                SmallVec::new()
            }

            OrderAction::SelectLine { id } => {
                if let Err(error) = Self::validate_select_line(state, id) {
                    Self::reject(state, name, error);
                    return SmallVec::new();
                }
                state.selected_line = Some(id);
                SmallVec::new()
            }

            OrderAction::ClearOrderSelection => {
                state.selected_order = None;
                state.selected_line = None;
                SmallVec::new()
            }

            OrderAction::ClearLineSelection => {
                state.selected_line = None;
                SmallVec::new()
            }

            OrderAction::MarkCompleted { id } => {
                let Some(index) = state.orders.iter().position(|order| order.id == id) else {
                    Self::reject(state, name, CatalogError::missing(Entity::Order, &id));
                    return SmallVec::new();
                };

                if state.orders[index].status == OrderStatus::Completed {
                    tracing::debug!(order = %id, "Order already completed");
                    return SmallVec::new();
                }

                state.orders[index] = state.orders[index].completed();
                tracing::info!(order = %id, "Order marked completed");
                SmallVec::new()
            }

            // ========== Events ==========
            OrderAction::SnapshotLoaded { orders, items } => {
                tracing::info!(orders = orders.len(), "Orders loaded");
                state.orders = orders;
                state.reference_items = items;
                state.selected_order = None;
                state.selected_line = None;
                state.load_status = LoadStatus::Loaded;
                state.last_error = None;
                SmallVec::new()
            }

            OrderAction::LoadFailed { error } => {
                tracing::error!(error = %error, "Order load failed");
                state.load_status = LoadStatus::Failed;
                state.last_error = Some(CatalogError::LoadFailed(error));
                SmallVec::new()
            }
        }
    }
}
