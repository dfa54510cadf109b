//! The order catalog.
//!
//! Holds every purchase order from the snapshot plus the presentation state
//! around them: status filter, sort, and the selected order and line.
//!
//! # Example
//!
//! ```
//! use stockroom::orders::{OrderState, SortField, StatusFilter};
//! use stockroom::model::{Order, OrderId, OrderStatus};
//!
//! let mut state = OrderState::with_orders(vec![
//!     Order::new(OrderId::new("O1"), "Zed", OrderStatus::Pending, vec![]),
//!     Order::new(OrderId::new("O2"), "Amy", OrderStatus::Pending, vec![]),
//! ]);
//! state.sort = state.sort.toggled(SortField::Customer);
//! state.status_filter = StatusFilter::Pending;
//!
//! let view = state.derive_view();
//! assert_eq!(view[0].customer, "Amy");
//! ```

pub mod reducer;
pub mod types;
pub mod view;

pub use reducer::{OrderEnvironment, OrderReducer};
pub use types::{
    ItemDetail, OrderAction, OrderState, SortCriteria, SortDirection, SortField, StatusFilter,
};
