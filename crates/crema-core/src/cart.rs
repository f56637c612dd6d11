//! # Cart Math
//!
//! The per-customer shopping cart and its line items.
//!
//! ## Price Snapshot Rule
//! A line copies the product's price when it is added. Later catalog
//! edits never reach lines already in a cart, and checkout copies the
//! line again into the order. The price a customer saw is the price they
//! pay.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                  │
//! │                                                                     │
//! │  Storefront Action        Engine Call            Cart Change        │
//! │  ─────────────────        ───────────            ───────────        │
//! │                                                                     │
//! │  Tap menu item ─────────► add_item() ──────────► merge or push      │
//! │                                                                     │
//! │  Change quantity ───────► update_quantity() ───► qty = n (0 drops)  │
//! │                                                                     │
//! │  Pick another size ─────► update_size() ───────► drinks reprice     │
//! │                                                                     │
//! │  Checkout / cancel ─────► clear() ─────────────► lines.clear()      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::effective_unit_price;
use crate::types::{ItemSize, Product, ProductKind};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product+size entry in a cart.
///
/// ## Design Notes
/// - `product_id` references the catalog entry for identity checks only
/// - `name`, `unit_price`, and `kind` are frozen copies taken at add time
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Line identifier (UUID v4), stable across quantity/size edits.
    pub id: String,

    /// Product id this line was created from.
    pub product_id: String,

    /// Product name at add time (frozen).
    pub name: String,

    /// Base unit price at add time (frozen). Size multipliers are applied
    /// on top of this when totaling, never folded into it.
    pub unit_price: Money,

    /// Product kind at add time (frozen). Decides whether size pricing
    /// applies.
    pub kind: ProductKind,

    /// Quantity, always at least 1. Driving it to 0 removes the line.
    pub quantity: u32,

    /// Selected size. Cosmetic for food lines.
    pub size: ItemSize,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line from a catalog product.
    pub fn from_product(product: &Product, quantity: u32, size: ItemSize) -> Self {
        CartLine {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            kind: product.kind,
            quantity,
            size,
            added_at: Utc::now(),
        }
    }

    /// Unit price with the size multiplier applied (drinks only).
    pub fn effective_unit_price(&self) -> Money {
        effective_unit_price(&self.kind, self.unit_price, self.size)
    }

    /// Line total: effective unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.effective_unit_price()
            .multiply_quantity(self.quantity as i64)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart of one customer.
///
/// ## Invariants
/// - At most one line per (product id, size) pair; adding the same pair
///   again increments the existing quantity
/// - Every line has quantity >= 1; quantity 0 removes the line
/// - Line order is insertion order (meaningful for display only)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart, merging with an existing line for the
    /// same (product, size) pair.
    ///
    /// The caller is responsible for checking availability and that
    /// `quantity >= 1`; this method owns the merge rule and the guard
    /// rails.
    ///
    /// ## Returns
    /// A copy of the created or updated line.
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: u32,
        size: ItemSize,
    ) -> CoreResult<CartLine> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id && l.size == size)
        {
            let new_qty = line.quantity.saturating_add(quantity);
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(line.clone());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let line = CartLine::from_product(product, quantity, size);
        self.lines.push(line.clone());
        Ok(line)
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0 removes the line
    /// - An unknown line id is a tolerated no-op, not an error (the line
    ///   may already have been removed)
    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            self.remove_line(line_id);
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Changes the size of a line.
    ///
    /// Only drinks reprice; a food line is left untouched (no-op), as is
    /// an unknown line id.
    pub fn update_size(&mut self, line_id: &str, size: ItemSize) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == line_id) {
            if line.kind.prices_by_size() {
                line.size = size;
            }
        }
    }

    /// Removes a line by id. Returns whether a line was removed.
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != line_id);
        self.lines.len() != before
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn drink(id: &str, price: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: format!("Drink {id}"),
            description: String::new(),
            price: Money::from_minor(price),
            kind: ProductKind::Drink { hot: true },
            available: true,
            image_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn food(id: &str, price: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: format!("Food {id}"),
            description: String::new(),
            price: Money::from_minor(price),
            kind: ProductKind::Food { vegetarian: true },
            available: true,
            image_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_add_line_and_subtotal() {
        let mut cart = Cart::new();
        cart.add_line(&drink("p1", 35_000), 2, ItemSize::M).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().minor(), 70_000);
    }

    #[test]
    fn test_same_product_and_size_merges() {
        let mut cart = Cart::new();
        let product = drink("p1", 35_000);

        cart.add_line(&product, 2, ItemSize::M).unwrap();
        let merged = cart.add_line(&product, 3, ItemSize::M).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(merged.quantity, 5);
    }

    #[test]
    fn test_same_product_different_size_is_a_new_line() {
        let mut cart = Cart::new();
        let product = drink("p1", 40_000);

        cart.add_line(&product, 1, ItemSize::M).unwrap();
        cart.add_line(&product, 1, ItemSize::L).unwrap();

        assert_eq!(cart.line_count(), 2);
        // M at 40 000 plus L at 52 000
        assert_eq!(cart.subtotal().minor(), 92_000);
    }

    #[test]
    fn test_drink_size_pricing() {
        let mut cart = Cart::new();
        let line = cart
            .add_line(&drink("p1", 40_000), 2, ItemSize::L)
            .unwrap();

        assert_eq!(line.effective_unit_price().minor(), 52_000);
        assert_eq!(line.line_total().minor(), 104_000);
    }

    #[test]
    fn test_food_size_is_cosmetic() {
        let mut cart = Cart::new();
        let line = cart.add_line(&food("p2", 25_000), 1, ItemSize::L).unwrap();

        assert_eq!(line.line_total().minor(), 25_000);

        // update_size is a no-op for food
        cart.update_size(&line.id, ItemSize::S);
        assert_eq!(cart.lines[0].size, ItemSize::L);
        assert_eq!(cart.subtotal().minor(), 25_000);
    }

    #[test]
    fn test_update_size_reprices_drink() {
        let mut cart = Cart::new();
        let line = cart.add_line(&drink("p1", 40_000), 1, ItemSize::M).unwrap();

        cart.update_size(&line.id, ItemSize::S);
        assert_eq!(cart.subtotal().minor(), 32_000);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        let line = cart.add_line(&drink("p1", 35_000), 2, ItemSize::M).unwrap();

        cart.update_quantity(&line.id, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_line(&drink("p1", 35_000), 2, ItemSize::M).unwrap();

        cart.update_quantity("no-such-line", 7).unwrap();
        assert_eq!(cart.lines[0].quantity, 2);
    }

    #[test]
    fn test_quantity_guard_rail() {
        let mut cart = Cart::new();
        let err = cart
            .add_line(&drink("p1", 35_000), MAX_LINE_QUANTITY + 1, ItemSize::M)
            .unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
    }

    #[test]
    fn test_price_snapshot_survives_catalog_edit() {
        let mut cart = Cart::new();
        let mut product = drink("p1", 10_000);
        cart.add_line(&product, 1, ItemSize::M).unwrap();

        // Catalog price doubles after the line was added
        product.price = Money::from_minor(20_000);

        assert_eq!(cart.subtotal().minor(), 10_000);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_line(&drink("p1", 35_000), 2, ItemSize::M).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
    }
}
