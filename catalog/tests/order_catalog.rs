//! Order catalog driven through its Store
//!
//! Covers the load lifecycle, the documented view scenarios, and the
//! ordering properties of the derived view.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use stockroom::app::Catalogs;
use stockroom::orders::{
    OrderAction, OrderEnvironment, OrderReducer, OrderState, SortField, StatusFilter,
};
use stockroom::source::{StaticSource, UnavailableSource};
use stockroom::{
    CatalogError, Item, ItemId, LoadStatus, Order, OrderId, OrderLine, OrderStatus, Snapshot,
};
use stockroom_runtime::Store;
use stockroom_testing::SequentialIds;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("stockroom=debug")
        .try_init();
}

fn order(id: &str, customer: &str, status: OrderStatus, lines: &[(u64, u32)]) -> Order {
    Order::new(
        OrderId::new(id),
        customer,
        status,
        lines
            .iter()
            .map(|(item, quantity)| {
                OrderLine::new(ItemId::new(*item), format!("Part {item}"), *quantity)
            })
            .collect(),
    )
}

fn zed_and_amy() -> Snapshot {
    Snapshot::new(
        vec![
            order("O1", "Zed", OrderStatus::Pending, &[(1, 2)]),
            order("O2", "Amy", OrderStatus::Pending, &[(2, 1)]),
        ],
        vec![Item::new(ItemId::new(1), "Part 1", 0), Item::new(ItemId::new(2), "Part 2", 6)],
    )
}

fn catalogs(snapshot: Snapshot) -> Catalogs {
    Catalogs::new(
        Arc::new(StaticSource::new(snapshot)),
        Arc::new(SequentialIds::default()),
        Duration::from_secs(1),
    )
}

fn ids(view: &[Order]) -> Vec<String> {
    view.iter().map(|o| o.id.to_string()).collect()
}

#[tokio::test]
async fn load_populates_orders() {
    init_tracing();
    let catalogs = catalogs(zed_and_amy());
    assert!(catalogs.load().await.is_ok());

    let (count, status, error) = catalogs
        .orders
        .state(|s| (s.count(), s.load_status, s.last_error.clone()))
        .await;
    assert_eq!(count, 2);
    assert_eq!(status, LoadStatus::Loaded);
    assert_eq!(error, None);
}

#[tokio::test]
async fn load_failure_leaves_catalog_empty() {
    init_tracing();
    let catalogs = Catalogs::new(
        Arc::new(UnavailableSource::new("connection refused")),
        Arc::new(SequentialIds::default()),
        Duration::from_secs(1),
    );
    assert!(catalogs.load().await.is_ok());

    let (count, status, error) = catalogs
        .orders
        .state(|s| (s.count(), s.load_status, s.last_error.clone()))
        .await;
    assert_eq!(count, 0);
    assert_eq!(status, LoadStatus::Failed);
    assert!(
        matches!(error, Some(CatalogError::LoadFailed(msg)) if msg.contains("connection refused"))
    );

    let items = catalogs.inventory.state(|s| s.count()).await;
    assert_eq!(items, 0);
}

#[tokio::test]
async fn customer_sort_scenario() {
    let catalogs = catalogs(zed_and_amy());
    assert!(catalogs.load().await.is_ok());

    assert!(catalogs
        .orders
        .send(OrderAction::ToggleSort {
            field: SortField::Customer
        })
        .await
        .is_ok());

    let view = catalogs.orders.state(OrderState::derive_view).await;
    assert_eq!(ids(&view), ["O2", "O1"]);
}

#[tokio::test]
async fn selecting_another_order_clears_line() {
    let catalogs = catalogs(zed_and_amy());
    assert!(catalogs.load().await.is_ok());

    let actions = [
        OrderAction::SelectOrder { id: OrderId::new("O1") },
        OrderAction::SelectLine { id: ItemId::new(1) },
    ];
    for action in actions {
        assert!(catalogs.orders.send(action).await.is_ok());
    }
    let detail = catalogs.orders.state(OrderState::item_detail).await;
    assert_eq!(detail.map(|d| (d.line.quantity, d.stock)), Some((2, Some(0))));

    assert!(catalogs
        .orders
        .send(OrderAction::SelectOrder { id: OrderId::new("O2") })
        .await
        .is_ok());

    let (order, line) = catalogs
        .orders
        .state(|s| (s.selected_order.clone(), s.selected_line))
        .await;
    assert_eq!(order, Some(OrderId::new("O2")));
    assert_eq!(line, None);
}

#[tokio::test]
async fn completed_order_is_reflected_in_selection() {
    let catalogs = catalogs(zed_and_amy());
    assert!(catalogs.load().await.is_ok());

    for action in [
        OrderAction::SelectOrder { id: OrderId::new("O1") },
        OrderAction::MarkCompleted { id: OrderId::new("O1") },
        OrderAction::MarkCompleted { id: OrderId::new("O1") },
    ] {
        assert!(catalogs.orders.send(action).await.is_ok());
    }

    let status = catalogs
        .orders
        .state(|s| s.selected_order().map(|o| o.status))
        .await;
    assert_eq!(status, Some(OrderStatus::Completed));
}

#[tokio::test]
async fn concurrent_completions_are_all_applied() {
    let orders: Vec<Order> = (0..50)
        .map(|n| order(&format!("O{n}"), "Kim", OrderStatus::Pending, &[]))
        .collect();
    let catalogs = catalogs(Snapshot::new(orders, vec![]));
    assert!(catalogs.load().await.is_ok());

    let mut tasks = Vec::new();
    for n in 0..50 {
        let store = catalogs.orders.clone();
        tasks.push(tokio::spawn(async move {
            store
                .send(OrderAction::MarkCompleted {
                    id: OrderId::new(format!("O{n}")),
                })
                .await
                .is_ok()
        }));
    }
    for task in tasks {
        assert!(matches!(task.await, Ok(true)));
    }

    let pending = catalogs
        .orders
        .state(|s| s.orders.iter().filter(|o| o.status == OrderStatus::Pending).count())
        .await;
    assert_eq!(pending, 0);
}

#[tokio::test]
async fn reload_replaces_contents() {
    let store = Store::new(
        OrderState::with_orders(vec![order("OLD", "Old", OrderStatus::Pending, &[])]),
        OrderReducer::new(),
        OrderEnvironment::new(Arc::new(StaticSource::new(zed_and_amy())), Duration::from_secs(1)),
    );

    let handle = store.send(OrderAction::Load).await;
    assert!(handle.is_ok());
    if let Ok(mut handle) = handle {
        handle.wait().await;
    }

    let loaded = store.state(|s| ids(&s.derive_view())).await;
    assert_eq!(loaded, ["O1", "O2"]);
}

fn arb_orders() -> impl Strategy<Value = Vec<Order>> {
    prop::collection::vec(("[A-Z][a-z]{0,6}", any::<bool>(), 0u32..10), 0..15).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(idx, (customer, done, quantity))| {
                let status = if done {
                    OrderStatus::Completed
                } else {
                    OrderStatus::Pending
                };
                order(&format!("O{idx}"), &customer, status, &[(1, quantity)])
            })
            .collect()
    })
}

fn view_after(orders: Vec<Order>, actions: Vec<OrderAction>) -> Vec<Order> {
    use stockroom_core::reducer::Reducer;

    let env = OrderEnvironment::new(Arc::new(StaticSource::default()), Duration::from_secs(1));
    let reducer = OrderReducer::new();
    let mut state = OrderState::with_orders(orders);
    for action in actions {
        let _ = reducer.reduce(&mut state, action, &env);
    }
    state.derive_view()
}

proptest! {
    #[test]
    fn all_filter_preserves_ids(orders in arb_orders()) {
        let view = view_after(orders.clone(), vec![]);
        let mut expected: Vec<_> = orders.iter().map(|o| o.id.clone()).collect();
        let mut actual: Vec<_> = view.iter().map(|o| o.id.clone()).collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn narrower_filters_never_grow(orders in arb_orders()) {
        for filter in [StatusFilter::Pending, StatusFilter::Completed] {
            let view = view_after(orders.clone(), vec![OrderAction::SetStatusFilter { filter }]);
            prop_assert!(view.len() <= orders.len());
            let all_match = orders.iter().all(|o| filter.matches(o.status));
            prop_assert_eq!(view.len() == orders.len(), all_match);
        }
    }

    #[test]
    fn double_toggle_restores_customer_order(orders in arb_orders()) {
        let customer = || OrderAction::ToggleSort { field: SortField::Customer };
        let once = view_after(orders.clone(), vec![customer()]);
        let thrice = view_after(orders, vec![customer(), customer(), customer()]);
        prop_assert_eq!(ids(&once), ids(&thrice));
    }

    #[test]
    fn mark_completed_is_idempotent(orders in arb_orders(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!orders.is_empty());
        let id = orders[pick.index(orders.len())].id.clone();
        let complete = || OrderAction::MarkCompleted { id: id.clone() };
        let once = view_after(orders.clone(), vec![complete()]);
        let twice = view_after(orders, vec![complete(), complete()]);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn descending_is_reverse_of_ascending_without_ties(orders in arb_orders()) {
        let mut customers: Vec<_> = orders.iter().map(|o| o.customer.clone()).collect();
        customers.sort();
        customers.dedup();
        prop_assume!(customers.len() == orders.len());

        let asc = view_after(
            orders.clone(),
            vec![OrderAction::ToggleSort { field: SortField::Customer }],
        );
        let desc = view_after(
            orders,
            vec![
                OrderAction::ToggleSort { field: SortField::Customer },
                OrderAction::ToggleSort { field: SortField::Customer },
            ],
        );
        let mut reversed = ids(&asc);
        reversed.reverse();
        prop_assert_eq!(ids(&desc), reversed);
    }
}
