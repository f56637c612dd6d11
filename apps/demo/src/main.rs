//! # Crema Demo
//!
//! Wires the storefront together and walks one checkout end to end:
//! seed the menu, log a customer in, fill a cart, place an order, and
//! move it through the kitchen.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (RUST_LOG controls verbosity)
//! 2. Open the document store (CREMA_DB_PATH for SQLite, memory otherwise)
//! 3. Open the storefront (first run imports the menu seed)
//! 4. Run the demo scenario

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crema_core::{ItemSize, OrderCategory, OrderStatus};
use crema_engine::{MenuSeed, ShopConfig, Storefront};
use crema_store::{DocumentStore, MemoryStore, SqliteStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let store = open_store().await?;
    let config = ShopConfig::from_env();
    let shop = Storefront::open(store, config, &MenuSeed).await?;

    run_demo(&shop).await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=crema=trace` - Trace for crema crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,crema=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Opens the document store.
///
/// Set `CREMA_DB_PATH` to persist to SQLite; without it the demo runs on
/// an in-memory store and leaves nothing behind.
async fn open_store() -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    match std::env::var("CREMA_DB_PATH") {
        Ok(path) => {
            info!(path = %path, "Using SQLite document store");
            Ok(Arc::new(SqliteStore::open(path).await?))
        }
        Err(_) => {
            info!("Using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// One full storefront round trip.
async fn run_demo(shop: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    // The manager checks the menu is up
    let (_admin_token, admin) = shop.users().login("admin").await?;
    let menu = shop.catalog().list_available();
    info!(items = menu.len(), "Menu loaded");

    // A customer logs in and shops
    let (token, customer) = shop.users().login("lan").await?;

    let drink = menu
        .iter()
        .find(|p| p.is_drink())
        .ok_or("menu has no drinks")?;
    let food = menu
        .iter()
        .find(|p| !p.is_drink())
        .ok_or("menu has no food")?;

    shop.carts()
        .add_item(&drink.id, 2, ItemSize::L, &customer)
        .await?;
    shop.carts()
        .add_item(&food.id, 1, ItemSize::M, &customer)
        .await?;

    for line in shop.carts().get_cart(&customer)? {
        println!(
            "  {} x{} ({})  {}",
            line.name,
            line.quantity,
            line.size.label(),
            line.line_total()
        );
    }

    // Checkout
    let order = shop
        .orders()
        .create_order(
            OrderCategory::Express,
            "12 Nguyen Hue, District 1",
            Some("Less ice, please".to_string()),
            &customer,
        )
        .await?;

    println!("Order {} placed ({:?})", order.id, order.status);
    println!("  Subtotal     {}", order.subtotal);
    println!("  Tax (10%)    {}", order.tax);
    println!("  Delivery     {}", order.delivery_fee);
    println!("  TOTAL        {}", order.total);
    println!("  Ready in ~{} minutes", order.estimated_prep_minutes());

    // The kitchen works the order
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ] {
        shop.orders().update_status(&order.id, status, &admin).await?;
    }

    // The customer checks their history through a fresh actor resolve
    let actor = shop
        .users()
        .resolve_actor(&token)
        .ok_or("session expired")?;
    let orders = shop.orders().list_orders(&actor)?;
    let profile = shop.users().customer(actor.id()).ok_or("customer missing")?;

    println!(
        "{} has {} order(s) and {} loyalty points",
        actor.username(),
        orders.len(),
        profile.loyalty_points
    );

    shop.users().logout(&token);
    Ok(())
}
