//! Reducer logic for the inventory catalog.
//!
//! Item creation, editing and deletion all go through here. Edits happen on
//! a working copy held in `editing`; the catalog only changes on commit.

use super::types::{parse_stock, validate_name, InventoryAction, InventoryState};
use crate::error::{CatalogError, Entity};
use crate::model::{Item, ItemId, LoadStatus};
use crate::source::{load_effect, DataSource};
use std::sync::Arc;
use std::time::Duration;
use stockroom_core::{
    effect::Effect, environment::IdGenerator, reducer::Reducer, smallvec, SmallVec,
};

/// Environment dependencies for the inventory reducer
#[derive(Clone)]
pub struct InventoryEnvironment {
    /// Where the snapshot comes from
    pub source: Arc<dyn DataSource>,
    /// Source of candidate ids for new items
    pub ids: Arc<dyn IdGenerator>,
    /// Upper bound on a single fetch
    pub load_timeout: Duration,
}

impl InventoryEnvironment {
    /// Creates a new `InventoryEnvironment`
    #[must_use]
    pub fn new(
        source: Arc<dyn DataSource>,
        ids: Arc<dyn IdGenerator>,
        load_timeout: Duration,
    ) -> Self {
        Self {
            source,
            ids,
            load_timeout,
        }
    }
}

/// Reducer for the inventory catalog
#[derive(Clone, Debug, Default)]
pub struct InventoryReducer;

impl InventoryReducer {
    /// Creates a new `InventoryReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn validate_begin_edit(state: &InventoryState, id: ItemId) -> Result<Item, CatalogError> {
        state
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::missing(Entity::Item, id))
    }

    fn validate_delete(state: &InventoryState, id: ItemId) -> Result<usize, CatalogError> {
        state
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| CatalogError::missing(Entity::Item, id))
    }

    fn reject(state: &mut InventoryState, action: &'static str, error: CatalogError) {
        tracing::warn!(action, error = %error, "Inventory command rejected");
        state.last_error = Some(error);
    }

    /// Writes the working copy back; the edit session closes either way
    /// unless the name fails validation.
    fn commit_edit(state: &mut InventoryState) -> Result<(), CatalogError> {
        let Some(working) = state.editing.as_ref() else {
            return Err(CatalogError::NotEditing);
        };

        let name = validate_name(&working.name)?;
        let id = working.id;
        let stock = working.stock;
        state.editing = None;

        let Some(item) = state.items.iter_mut().find(|item| item.id == id) else {
            return Err(CatalogError::missing(Entity::Item, id));
        };
        item.name = name;
        item.stock = stock;
        tracing::info!(item = %id, "Item updated");
        Ok(())
    }
}

impl Reducer for InventoryReducer {
    type State = InventoryState;
    type Action = InventoryAction;
    type Environment = InventoryEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let name = action.name();
        tracing::debug!(action = name, "Reducing inventory action");

        if action.is_command() {
            state.last_error = None;
        }

        match action {
            // ========== Commands ==========
            InventoryAction::Load => {
                if state.load_status == LoadStatus::Loading {
                    tracing::debug!("Inventory load already in flight");
                    return SmallVec::new();
                }
                state.load_status = LoadStatus::Loading;
                tracing::info!(source = %env.source.describe(), "Loading inventory");

                smallvec![load_effect(
                    Arc::clone(&env.source),
                    env.load_timeout,
                    |snapshot| InventoryAction::SnapshotLoaded {
                        items: snapshot.items,
                    },
                    |error| InventoryAction::LoadFailed { error },
                )]
            }

            InventoryAction::SetStockFilter { filter } => {
                state.stock_filter = filter;
                SmallVec::new()
            }

            InventoryAction::DraftChanged { field, value } => {
                state.draft.set(field, value);
                SmallVec::new()
            }

            InventoryAction::AddItem => {
                let (item_name, stock) = match state.draft.validate() {
                    Ok(valid) => valid,
                    Err(error) => {
                        Self::reject(state, name, error.into());
                        return SmallVec::new();
                    }
                };

                let Some(id) = state.fresh_id(env.ids.next_id()) else {
                    Self::reject(state, name, CatalogError::IdsExhausted);
                    return SmallVec::new();
                };
                tracing::info!(item = %id, name = %item_name, stock, "Item added");
                state.items.push(Item::new(id, item_name, stock));
                state.draft = super::types::ItemDraft::default();
                SmallVec::new()
            }

            InventoryAction::BeginEdit { id } => {
                match Self::validate_begin_edit(state, id) {
                    Ok(working) => state.editing = Some(working),
                    Err(error) => Self::reject(state, name, error),
                }
                SmallVec::new()
            }

            InventoryAction::EditName { value } => {
                match state.editing.as_mut() {
                    Some(working) => working.name = value,
                    None => Self::reject(state, name, CatalogError::NotEditing),
                }
                SmallVec::new()
            }

            InventoryAction::EditStock { value } => {
                let Some(working) = state.editing.as_mut() else {
                    Self::reject(state, name, CatalogError::NotEditing);
                    return SmallVec::new();
                };
                match parse_stock(&value) {
                    Ok(stock) => working.stock = stock,
                    Err(error) => Self::reject(state, name, error.into()),
                }
                SmallVec::new()
            }

            InventoryAction::CommitEdit => {
                if let Err(error) = Self::commit_edit(state) {
                    Self::reject(state, name, error);
                }
                SmallVec::new()
            }

            InventoryAction::CancelEdit => {
                state.editing = None;
                SmallVec::new()
            }

            InventoryAction::DeleteItem { id } => {
                match Self::validate_delete(state, id) {
                    Ok(index) => {
                        state.items.remove(index);
                        if state.editing.as_ref().is_some_and(|working| working.id == id) {
                            state.editing = None;
                        }
                        tracing::info!(item = %id, "Item deleted");
                    }
                    Err(error) => Self::reject(state, name, error),
                }
                SmallVec::new()
            }

            // ========== Events ==========
            InventoryAction::SnapshotLoaded { items } => {
                tracing::info!(items = items.len(), "Inventory loaded");
                state.items = items;
                state.editing = None;
                state.load_status = LoadStatus::Loaded;
                state.last_error = None;
                SmallVec::new()
            }

            InventoryAction::LoadFailed { error } => {
                tracing::error!(error = %error, "Inventory load failed");
                state.load_status = LoadStatus::Failed;
                state.last_error = Some(CatalogError::LoadFailed(error));
                SmallVec::new()
            }
        }
    }
}
