//! # Order Manager
//!
//! Checkout and the order lifecycle.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  create_order(category, detail, notes, actor)                       │
//! │                                                                     │
//! │  1. gate: actor must be a customer                                  │
//! │  2. snapshot the cart (ValidationError if empty)                    │
//! │  3. build the Order: copied lines, subtotal, 10% tax, category fee  │
//! │  4. persist the order                                               │
//! │  5. append order id + loyalty points to the customer                │
//! │  6. clear the cart                                                  │
//! │  7. return the Order (status PENDING)                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//! Orders are append-only: status transitions (admin only, forward or
//! cancel) are the only mutation ever applied after checkout.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crema_core::access::{can_access_order, ensure_admin, ensure_customer};
use crema_core::{Actor, CoreError, Order, OrderCategory, OrderStatus};
use crema_store::{to_document, Collection, DocumentStore};

use crate::cart::CartManager;
use crate::config::ShopConfig;
use crate::error::ShopResult;
use crate::repo::Repository;
use crate::session::UserDirectory;

/// Append-only order book plus the checkout operation.
pub struct OrderManager {
    orders: Mutex<Repository<Order>>,
    carts: Arc<CartManager>,
    users: Arc<UserDirectory>,
    config: ShopConfig,
    store: Arc<dyn DocumentStore>,
}

impl OrderManager {
    /// Hydrates the order book from the orders collection.
    pub async fn load(
        store: Arc<dyn DocumentStore>,
        carts: Arc<CartManager>,
        users: Arc<UserDirectory>,
        config: ShopConfig,
    ) -> ShopResult<Self> {
        let mut orders = Repository::new();
        for doc in store.load_all(Collection::Orders).await? {
            let order: Order = crema_store::from_document(Collection::Orders, doc)?;
            orders.upsert(order);
        }
        debug!(count = orders.len(), "Order book hydrated");

        Ok(OrderManager {
            orders: Mutex::new(orders),
            carts,
            users,
            config,
            store,
        })
    }

    /// Converts the acting customer's cart into an order, atomically.
    ///
    /// The order is built from a cart snapshot; every line is copied by
    /// value, so later catalog edits never change what was charged. On
    /// success the cart is empty, the order id is on the customer's
    /// history, and loyalty points are credited (1 per 10 000 ₫).
    ///
    /// ## Errors
    /// - Unauthorized unless the actor is a customer
    /// - ValidationError when the cart is empty
    pub async fn create_order(
        &self,
        category: OrderCategory,
        fulfillment_detail: impl Into<String>,
        notes: Option<String>,
        actor: &Actor,
    ) -> ShopResult<Order> {
        ensure_customer(actor, "place orders")?;

        let cart = self.carts.snapshot(actor.id());
        let order = Order::from_cart(
            actor.id(),
            &cart,
            category,
            fulfillment_detail,
            notes,
            self.config.tax_rate,
        )?;

        self.orders
            .lock()
            .expect("order mutex poisoned")
            .upsert(order.clone());
        self.persist(&order).await?;

        let points = order.total.minor() / self.config.loyalty_point_unit;
        self.users.record_order(actor.id(), &order.id, points).await?;

        self.carts.clear(actor.id());

        info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            total = %order.total,
            category = ?order.category,
            "Order placed"
        );
        Ok(order)
    }

    /// Moves an order to a new status. Admin only.
    ///
    /// ## Errors
    /// - Unauthorized for non-admin actors
    /// - NotFound for an unknown order id
    /// - InvalidStatusTransition for backward, skipping, or out-of-terminal
    ///   moves
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        actor: &Actor,
    ) -> ShopResult<Order> {
        ensure_admin(actor, "update order status")?;

        let order = {
            let mut orders = self.orders.lock().expect("order mutex poisoned");
            let order = orders
                .get_mut(order_id)
                .ok_or_else(|| CoreError::not_found("Order", order_id))?;
            order.apply_status(new_status)?;
            order.clone()
        };

        self.persist(&order).await?;
        info!(order_id = %order_id, status = ?new_status, "Order status updated");
        Ok(order)
    }

    /// Fetches one order.
    ///
    /// Existence is checked before access, so an unknown id is always
    /// NotFound. Admins read everything; a customer reads an order only
    /// when its id is in their (live) order history.
    pub fn get_order(&self, order_id: &str, actor: &Actor) -> ShopResult<Order> {
        let actor = self.users.refreshed(actor);

        let orders = self.orders.lock().expect("order mutex poisoned");
        let order = orders
            .get(order_id)
            .ok_or_else(|| CoreError::not_found("Order", order_id))?;

        if !can_access_order(&actor, order) {
            return Err(CoreError::unauthorized("You cannot view this order").into());
        }
        Ok(order.clone())
    }

    /// Lists orders the actor may see: all of them for an admin, the
    /// actor's own for a customer. Insertion (placement) order.
    pub fn list_orders(&self, actor: &Actor) -> ShopResult<Vec<Order>> {
        let actor = self.users.refreshed(actor);
        let orders = self.orders.lock().expect("order mutex poisoned");
        Ok(orders
            .iter()
            .filter(|o| can_access_order(&actor, o))
            .cloned()
            .collect())
    }

    async fn persist(&self, order: &Order) -> ShopResult<()> {
        let doc = to_document(Collection::Orders, order)?;
        self.store.save(Collection::Orders, &[doc]).await?;
        Ok(())
    }
}
