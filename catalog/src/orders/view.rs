//! Derived order view.

use super::types::{SortCriteria, SortField, StatusFilter};
use crate::model::Order;
use std::cmp::Ordering;

/// Filter then sort `orders`
///
/// Returns a fresh vector on every call. The sort is stable, so orders
/// comparing equal keep their snapshot order in both directions.
#[must_use]
pub fn derive_view(orders: &[Order], filter: StatusFilter, sort: SortCriteria) -> Vec<Order> {
    let mut view: Vec<Order> = orders
        .iter()
        .filter(|order| filter.matches(order.status))
        .cloned()
        .collect();

    if let Some(field) = sort.field {
        view.sort_by(|a, b| sort.direction.apply(compare(field, a, b)));
    }

    view
}

fn compare(field: SortField, a: &Order, b: &Order) -> Ordering {
    match field {
        SortField::Customer => a.customer.cmp(&b.customer),
        SortField::ItemCount => a.item_count().cmp(&b.item_count()),
    }
}
