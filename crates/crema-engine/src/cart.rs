//! # Cart Manager
//!
//! Per-customer carts, keyed by customer id.
//!
//! ## Scope Decision
//! Carts are session-scoped: they live in process memory and are not
//! persisted. A cart ends at checkout, on explicit clear, or when the
//! process does. Operations on distinct customers' carts are independent;
//! within one cart, calls apply in the order issued.
//!
//! Prices are copied from the catalog at add time (see
//! [`crema_core::cart`] for the snapshot rule); this manager owns the
//! catalog lookup and the role gate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crema_core::access::ensure_customer;
use crema_core::validation::validate_quantity;
use crema_core::{Actor, Cart, CartLine, ItemSize, ValidationError};

use crate::catalog::CatalogManager;
use crate::error::ShopResult;

/// Carts for every customer with an active session.
pub struct CartManager {
    carts: Mutex<HashMap<String, Cart>>,
    catalog: Arc<CatalogManager>,
}

impl CartManager {
    /// Creates an empty cart manager over the given catalog.
    pub fn new(catalog: Arc<CatalogManager>) -> Self {
        CartManager {
            carts: Mutex::new(HashMap::new()),
            catalog,
        }
    }

    /// Adds a product to the acting customer's cart.
    ///
    /// Looks up the current catalog price and copies it into the line.
    /// An existing line for the same (product, size) pair has its
    /// quantity incremented instead of a duplicate being created.
    ///
    /// ## Errors
    /// - Unauthorized unless the actor is a customer
    /// - ValidationError when the product is missing or unavailable, or
    ///   the quantity is below 1
    pub async fn add_item(
        &self,
        product_id: &str,
        quantity: u32,
        size: ItemSize,
        actor: &Actor,
    ) -> ShopResult<CartLine> {
        ensure_customer(actor, "add items to a cart")?;
        validate_quantity(quantity)?;

        let product = self
            .catalog
            .get_by_id(product_id)
            .filter(|p| p.available)
            .ok_or(ValidationError::ProductUnavailable {
                id: product_id.to_string(),
            })?;

        let line = {
            let mut carts = self.carts.lock().expect("cart mutex poisoned");
            let cart = carts.entry(actor.id().to_string()).or_default();
            cart.add_line(&product, quantity, size)?
        };

        debug!(customer_id = %actor.id(), product_id = %product_id, quantity, "Item added to cart");
        Ok(line)
    }

    /// Sets the quantity of a line in the acting customer's cart.
    /// Quantity 0 removes the line; an already-removed line is tolerated.
    pub fn update_quantity(
        &self,
        line_id: &str,
        quantity: u32,
        actor: &Actor,
    ) -> ShopResult<()> {
        ensure_customer(actor, "edit a cart")?;

        let mut carts = self.carts.lock().expect("cart mutex poisoned");
        if let Some(cart) = carts.get_mut(actor.id()) {
            cart.update_quantity(line_id, quantity)?;
        }
        Ok(())
    }

    /// Changes the size of a line in the acting customer's cart.
    /// Repricing applies to drinks only; food lines are untouched.
    pub fn update_size(&self, line_id: &str, size: ItemSize, actor: &Actor) -> ShopResult<()> {
        ensure_customer(actor, "edit a cart")?;

        let mut carts = self.carts.lock().expect("cart mutex poisoned");
        if let Some(cart) = carts.get_mut(actor.id()) {
            cart.update_size(line_id, size);
        }
        Ok(())
    }

    /// Returns the acting customer's own cart lines in insertion order.
    pub fn get_cart(&self, actor: &Actor) -> ShopResult<Vec<CartLine>> {
        ensure_customer(actor, "view a cart")?;

        let carts = self.carts.lock().expect("cart mutex poisoned");
        Ok(carts
            .get(actor.id())
            .map(|c| c.lines.clone())
            .unwrap_or_default())
    }

    /// Empties the named customer's cart. Called by checkout and by an
    /// explicit cancel; takes no actor because checkout already gated.
    pub fn clear(&self, customer_id: &str) {
        let mut carts = self.carts.lock().expect("cart mutex poisoned");
        if let Some(cart) = carts.get_mut(customer_id) {
            cart.clear();
        }
    }

    /// A value snapshot of the named customer's cart (for checkout).
    pub(crate) fn snapshot(&self, customer_id: &str) -> Cart {
        let carts = self.carts.lock().expect("cart mutex poisoned");
        carts.get(customer_id).cloned().unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
