//! End-to-end service flows over an assembled storefront.

use std::sync::Arc;

use async_trait::async_trait;

use crema_core::{Actor, ItemSize, Money, OrderCategory, OrderStatus, ProductKind};
use crema_engine::{
    CatalogSeed, MenuSeed, ProductDraft, ProductPatch, RawProductRecord, ShopConfig,
    ShopResult, Storefront,
};
use crema_store::{DocumentStore, MemoryStore};

/// Seed that delivers nothing, for tests that build their own menu.
struct EmptySeed;

#[async_trait]
impl CatalogSeed for EmptySeed {
    async fn fetch(&self) -> ShopResult<Vec<RawProductRecord>> {
        Ok(Vec::new())
    }
}

async fn open_empty() -> (Arc<dyn DocumentStore>, Storefront) {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let shop = Storefront::open(store.clone(), ShopConfig::default(), &EmptySeed)
        .await
        .unwrap();
    (store, shop)
}

async fn login(shop: &Storefront, username: &str) -> Actor {
    let (_, actor) = shop.users().login(username).await.unwrap();
    actor
}

fn drink_draft(name: &str, price: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: String::new(),
        price: Money::from_minor(price),
        kind: ProductKind::Drink { hot: true },
        image_url: String::new(),
    }
}

fn food_draft(name: &str, price: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: String::new(),
        price: Money::from_minor(price),
        kind: ProductKind::Food { vegetarian: false },
        image_url: String::new(),
    }
}

#[tokio::test]
async fn end_to_end_standard_checkout() {
    let (_, shop) = open_empty().await;
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;

    let drink = shop
        .catalog()
        .create_product(drink_draft("Phin Sữa Đá", 35_000), &admin)
        .await
        .unwrap();
    let food = shop
        .catalog()
        .create_product(food_draft("Bánh Mì Que Pate", 25_000), &admin)
        .await
        .unwrap();

    shop.carts()
        .add_item(&drink.id, 2, ItemSize::M, &lan)
        .await
        .unwrap();
    shop.carts()
        .add_item(&food.id, 1, ItemSize::M, &lan)
        .await
        .unwrap();

    let order = shop
        .orders()
        .create_order(OrderCategory::Standard, "12 Nguyen Hue", None, &lan)
        .await
        .unwrap();

    // 35 000×2 + 25 000 = 95 000; +9 500 tax; +25 000 standard fee
    assert_eq!(order.subtotal.minor(), 95_000);
    assert_eq!(order.tax.minor(), 9_500);
    assert_eq!(order.delivery_fee.minor(), 25_000);
    assert_eq!(order.total.minor(), 129_500);
    assert_eq!(order.status, OrderStatus::Pending);

    // Checkout emptied the cart
    assert!(shop.carts().get_cart(&lan).unwrap().is_empty());

    // Order id landed on the customer's history; loyalty points credited
    // (100 welcome + 129 500 / 10 000 = 12)
    let profile = shop.users().customer(lan.id()).unwrap();
    assert_eq!(profile.order_ids, vec![order.id.clone()]);
    assert_eq!(profile.loyalty_points, 112);

    // And the customer can read their own order back
    let fetched = shop.orders().get_order(&order.id, &lan).unwrap();
    assert_eq!(fetched.total.minor(), 129_500);
}

#[tokio::test]
async fn express_checkout_doubles_fee_and_halves_wait() {
    let (_, shop) = open_empty().await;
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;

    let drink = shop
        .catalog()
        .create_product(drink_draft("Espresso", 35_000), &admin)
        .await
        .unwrap();
    shop.carts()
        .add_item(&drink.id, 1, ItemSize::M, &lan)
        .await
        .unwrap();

    let order = shop
        .orders()
        .create_order(OrderCategory::Express, "counter 3", None, &lan)
        .await
        .unwrap();

    assert_eq!(order.delivery_fee.minor(), 50_000);
    assert_eq!(order.estimated_prep_minutes(), 15);
    assert!(order.category.is_priority());
}

#[tokio::test]
async fn checkout_with_empty_cart_is_rejected() {
    let (_, shop) = open_empty().await;
    let lan = login(&shop, "lan").await;

    let err = shop
        .orders()
        .create_order(OrderCategory::Standard, "12 Nguyen Hue", None, &lan)
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn order_totals_are_isolated_from_later_catalog_edits() {
    let (_, shop) = open_empty().await;
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;

    let drink = shop
        .catalog()
        .create_product(drink_draft("Cà Phê Sữa Đá", 10_000), &admin)
        .await
        .unwrap();
    shop.carts()
        .add_item(&drink.id, 1, ItemSize::M, &lan)
        .await
        .unwrap();

    // Price doubles after the item is in the cart
    shop.catalog()
        .update_product(
            &drink.id,
            ProductPatch {
                price: Some(Money::from_minor(20_000)),
                ..Default::default()
            },
            &admin,
        )
        .await
        .unwrap();

    let order = shop
        .orders()
        .create_order(OrderCategory::Standard, "12 Nguyen Hue", None, &lan)
        .await
        .unwrap();

    assert_eq!(order.lines[0].unit_price.minor(), 10_000);
    assert_eq!(order.subtotal.minor(), 10_000);
}

#[tokio::test]
async fn size_pricing_applies_to_drinks_only() {
    let (_, shop) = open_empty().await;
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;

    let drink = shop
        .catalog()
        .create_product(drink_draft("Freeze Trà Xanh", 40_000), &admin)
        .await
        .unwrap();
    let food = shop
        .catalog()
        .create_product(food_draft("Croissant", 40_000), &admin)
        .await
        .unwrap();

    shop.carts()
        .add_item(&drink.id, 2, ItemSize::L, &lan)
        .await
        .unwrap();
    shop.carts()
        .add_item(&food.id, 2, ItemSize::L, &lan)
        .await
        .unwrap();

    let lines = shop.carts().get_cart(&lan).unwrap();
    // 40 000 × 1.3 × 2 for the drink, flat 40 000 × 2 for the food
    assert_eq!(lines[0].line_total().minor(), 104_000);
    assert_eq!(lines[1].line_total().minor(), 80_000);
}

#[tokio::test]
async fn authorization_matrix() {
    let (_, shop) = open_empty().await;
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;

    // Customers may not touch the catalog or order statuses
    assert!(shop
        .catalog()
        .create_product(drink_draft("X", 1_000), &lan)
        .await
        .unwrap_err()
        .is_unauthorized());
    assert!(shop
        .catalog()
        .update_product("any", ProductPatch::default(), &lan)
        .await
        .unwrap_err()
        .is_unauthorized());
    assert!(shop
        .catalog()
        .delete_product("any", &lan)
        .await
        .unwrap_err()
        .is_unauthorized());
    assert!(shop
        .orders()
        .update_status("any", OrderStatus::Confirmed, &lan)
        .await
        .unwrap_err()
        .is_unauthorized());

    // Admins may not act as shoppers
    assert!(shop
        .carts()
        .add_item("any", 1, ItemSize::M, &admin)
        .await
        .unwrap_err()
        .is_unauthorized());
    assert!(shop.carts().get_cart(&admin).unwrap_err().is_unauthorized());
    assert!(shop
        .orders()
        .create_order(OrderCategory::Standard, "x", None, &admin)
        .await
        .unwrap_err()
        .is_unauthorized());
}

#[tokio::test]
async fn customers_see_only_their_own_orders() {
    let (_, shop) = open_empty().await;
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;
    let minh = login(&shop, "minh").await;

    let drink = shop
        .catalog()
        .create_product(drink_draft("Espresso", 35_000), &admin)
        .await
        .unwrap();

    shop.carts()
        .add_item(&drink.id, 1, ItemSize::M, &lan)
        .await
        .unwrap();
    let lan_order = shop
        .orders()
        .create_order(OrderCategory::Standard, "lan's place", None, &lan)
        .await
        .unwrap();

    shop.carts()
        .add_item(&drink.id, 1, ItemSize::M, &minh)
        .await
        .unwrap();
    let minh_order = shop
        .orders()
        .create_order(OrderCategory::Standard, "minh's place", None, &minh)
        .await
        .unwrap();

    // Cross-customer reads are rejected; unknown ids are NotFound
    assert!(shop
        .orders()
        .get_order(&minh_order.id, &lan)
        .unwrap_err()
        .is_unauthorized());
    assert!(shop
        .orders()
        .get_order("no-such-order", &lan)
        .unwrap_err()
        .is_not_found());

    // Listings: admin sees both, customers see one each
    assert_eq!(shop.orders().list_orders(&admin).unwrap().len(), 2);
    let lan_orders = shop.orders().list_orders(&lan).unwrap();
    assert_eq!(lan_orders.len(), 1);
    assert_eq!(lan_orders[0].id, lan_order.id);
}

#[tokio::test]
async fn status_lifecycle_through_the_engine() {
    let (_, shop) = open_empty().await;
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;

    let drink = shop
        .catalog()
        .create_product(drink_draft("Espresso", 35_000), &admin)
        .await
        .unwrap();
    shop.carts()
        .add_item(&drink.id, 1, ItemSize::M, &lan)
        .await
        .unwrap();
    let order = shop
        .orders()
        .create_order(OrderCategory::Standard, "x", None, &lan)
        .await
        .unwrap();

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ] {
        shop.orders()
            .update_status(&order.id, status, &admin)
            .await
            .unwrap();
    }

    // Delivered is terminal
    let err = shop
        .orders()
        .update_status(&order.id, OrderStatus::Pending, &admin)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        crema_engine::ShopError::Core(crema_core::CoreError::InvalidStatusTransition { .. })
    ));

    assert!(shop
        .orders()
        .update_status("no-such-order", OrderStatus::Confirmed, &admin)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn state_survives_a_restart() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    let order_id = {
        let shop = Storefront::open(store.clone(), ShopConfig::default(), &EmptySeed)
            .await
            .unwrap();
        let admin = login(&shop, "admin").await;
        let lan = login(&shop, "lan").await;

        let drink = shop
            .catalog()
            .create_product(drink_draft("Espresso", 35_000), &admin)
            .await
            .unwrap();
        shop.carts()
            .add_item(&drink.id, 1, ItemSize::M, &lan)
            .await
            .unwrap();
        shop.orders()
            .create_order(OrderCategory::Standard, "x", None, &lan)
            .await
            .unwrap()
            .id
    };

    // "Restart": a fresh storefront over the same store
    let shop = Storefront::open(store, ShopConfig::default(), &EmptySeed)
        .await
        .unwrap();
    let admin = login(&shop, "admin").await;
    let lan = login(&shop, "lan").await;

    assert_eq!(shop.catalog().list_available().len(), 1);
    let order = shop.orders().get_order(&order_id, &admin).unwrap();
    assert_eq!(order.total.minor(), 63_500);

    // The rehydrated customer still owns their order (history persisted)
    assert_eq!(shop.orders().list_orders(&lan).unwrap().len(), 1);

    // Carts are session-scoped and did NOT survive
    assert!(shop.carts().get_cart(&lan).unwrap().is_empty());
}

#[tokio::test]
async fn menu_seed_runs_once() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    let shop = Storefront::open(store.clone(), ShopConfig::default(), &MenuSeed)
        .await
        .unwrap();
    let menu_len = shop.catalog().list_available().len();
    assert!(menu_len > 0);

    let reopened = Storefront::open(store, ShopConfig::default(), &MenuSeed)
        .await
        .unwrap();
    assert_eq!(reopened.catalog().list_available().len(), menu_len);
}
