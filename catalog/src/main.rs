//! Command-line walkthrough of both catalogs.
//!
//! Loads the snapshot named by `STOCKROOM_SOURCE`, prints each catalog, then
//! runs a few filter, sort and edit operations and prints the results.

use std::time::Duration;
use stockroom::inventory::{DraftField, InventoryAction, StockFilter};
use stockroom::orders::{OrderAction, SortField, StatusFilter};
use stockroom::{Catalogs, Item, Order, StockroomConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_orders(title: &str, orders: &[Order]) {
    println!("{title}");
    for order in orders {
        println!(
            "  {:<8} {:<18} {:<10} {:>4} items",
            order.id,
            order.customer,
            order.status,
            order.item_count()
        );
    }
    println!();
}

fn print_items(title: &str, items: &[Item]) {
    println!("{title}");
    for item in items {
        println!("  #{:<14} {:<16} stock {}", item.id, item.name, item.stock);
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StockroomConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(source = %config.source, timeout_secs = config.load_timeout_secs, "Starting stockroom");

    let catalogs = Catalogs::from_config(&config);
    catalogs.load().await?;

    let failures = catalogs.load_failures().await;
    if !failures.is_empty() {
        for (catalog, reason) in failures {
            eprintln!("Could not load {catalog} from {}: {reason}", config.source);
        }
        return Ok(());
    }

    println!("=== Orders ===\n");
    print_orders("All orders:", &catalogs.orders.state(|s| s.derive_view()).await);

    catalogs
        .orders
        .send(OrderAction::SetStatusFilter {
            filter: StatusFilter::Pending,
        })
        .await?;
    catalogs
        .orders
        .send(OrderAction::ToggleSort {
            field: SortField::ItemCount,
        })
        .await?;
    catalogs
        .orders
        .send(OrderAction::ToggleSort {
            field: SortField::ItemCount,
        })
        .await?;
    print_orders(
        "Pending, most items first:",
        &catalogs.orders.state(|s| s.derive_view()).await,
    );

    if let Some(first) = catalogs.orders.state(|s| s.derive_view().into_iter().next()).await {
        catalogs
            .orders
            .send(OrderAction::SelectOrder {
                id: first.id.clone(),
            })
            .await?;
        if let Some(line) = first.items.first() {
            catalogs
                .orders
                .send(OrderAction::SelectLine { id: line.id })
                .await?;
        }
        if let Some(detail) = catalogs.orders.state(|s| s.item_detail()).await {
            let stock = detail
                .stock
                .map_or_else(|| "not in inventory".to_string(), |n| n.to_string());
            println!(
                "Order {} line: {} x{} (stock: {stock})\n",
                first.id, detail.line.name, detail.line.quantity
            );
        }

        catalogs
            .orders
            .send(OrderAction::MarkCompleted { id: first.id })
            .await?;
        catalogs.orders.send(OrderAction::ClearOrderSelection).await?;
        print_orders(
            "Pending after completing one:",
            &catalogs.orders.state(|s| s.derive_view()).await,
        );
    }

    println!("=== Inventory ===\n");
    print_items("All items:", &catalogs.inventory.state(|s| s.derive_view()).await);

    for (field, value) in [(DraftField::Name, "Cotter Pin"), (DraftField::Stock, "75")] {
        catalogs
            .inventory
            .send(InventoryAction::DraftChanged {
                field,
                value: value.to_string(),
            })
            .await?;
    }
    catalogs.inventory.send(InventoryAction::AddItem).await?;

    catalogs
        .inventory
        .send(InventoryAction::SetStockFilter {
            filter: StockFilter::OutOfStock,
        })
        .await?;
    let out_of_stock = catalogs.inventory.state(|s| s.derive_view()).await;
    print_items("Out of stock:", &out_of_stock);

    if let Some(item) = out_of_stock.first() {
        catalogs
            .inventory
            .send(InventoryAction::BeginEdit { id: item.id })
            .await?;
        catalogs
            .inventory
            .send(InventoryAction::EditStock {
                value: "25".to_string(),
            })
            .await?;
        catalogs.inventory.send(InventoryAction::CommitEdit).await?;
    }

    catalogs
        .inventory
        .send(InventoryAction::SetStockFilter {
            filter: StockFilter::All,
        })
        .await?;
    print_items(
        "After restocking one item:",
        &catalogs.inventory.state(|s| s.derive_view()).await,
    );

    catalogs.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
