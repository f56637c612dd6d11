//! # Orders
//!
//! The immutable checkout record and its status state machine.
//!
//! ## Status State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │  PENDING ──► CONFIRMED ──► PREPARING ──► READY ──► DELIVERED        │
//! │     │            │             │           │          (terminal)    │
//! │     └────────────┴─────────────┴───────────┴──► CANCELLED           │
//! │                                                  (terminal)         │
//! │                                                                     │
//! │  Transitions move exactly one step forward, or cancel from any      │
//! │  non-terminal state. Anything else is rejected.                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Rule
//! An order is materialized from a cart at checkout by COPYING every line.
//! After creation it holds no reference to the cart or the catalog; later
//! product edits can never change what a placed order charges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, TaxRate};
use crate::types::ItemSize;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether no further transitions are allowed from this state.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The next state on the fulfillment path, if any.
    const fn forward_next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Whether a transition from `self` to `to` is legal.
    ///
    /// Legal moves are the single forward step and cancellation from any
    /// non-terminal state. Backward moves, skips, and moves out of a
    /// terminal state are rejected.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if to == OrderStatus::Cancelled {
            return true;
        }
        self.forward_next() == Some(to)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order Category
// =============================================================================

/// Fulfillment tier of an order.
///
/// Delivery fee and preparation estimate are pure functions of the tag,
/// so adding a tier is a one-arm change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderCategory {
    /// Regular delivery.
    Standard,
    /// Priority handling: double fee, half the wait.
    Express,
}

impl OrderCategory {
    /// Flat delivery fee for this tier.
    #[inline]
    pub const fn delivery_fee(&self) -> Money {
        match self {
            OrderCategory::Standard => Money::from_minor(25_000),
            OrderCategory::Express => Money::from_minor(50_000),
        }
    }

    /// Estimated preparation time in minutes.
    #[inline]
    pub const fn estimated_prep_minutes(&self) -> u32 {
        match self {
            OrderCategory::Standard => 30,
            OrderCategory::Express => 15,
        }
    }

    /// Whether orders in this tier jump the queue.
    #[inline]
    pub const fn is_priority(&self) -> bool {
        matches!(self, OrderCategory::Express)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A fully copied line snapshot inside an order.
///
/// No field references the cart or the catalog; the snapshot is the
/// record of what was charged.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    /// Product id at checkout time (for reporting; not a live reference).
    pub product_id: String,

    /// Product name at checkout time.
    pub name: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Base unit price that was in the cart line.
    pub unit_price: Money,

    /// Selected size.
    pub size: ItemSize,

    /// Line total as charged (size multiplier already applied).
    pub line_total: Money,
}

// =============================================================================
// Order
// =============================================================================

/// An order placed at checkout.
///
/// ## Lifecycle
/// Created atomically from a non-empty cart; after that only `status` and
/// `updated_at` ever change, and only through [`Order::apply_status`].
/// Orders are never deleted (append-only history).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The customer who placed the order.
    pub customer_id: String,

    /// Copied line snapshots, in cart order.
    pub lines: Vec<OrderLine>,

    /// Fulfillment tier.
    pub category: OrderCategory,

    /// Current lifecycle state.
    pub status: OrderStatus,

    /// Sum of line totals.
    pub subtotal: Money,

    /// Tax rate that was in force at checkout.
    pub tax_rate: TaxRate,

    /// Tax charged: subtotal × rate.
    pub tax: Money,

    /// Category-dependent flat fee.
    pub delivery_fee: Money,

    /// subtotal + tax + delivery fee. Fixed at creation.
    pub total: Money,

    /// Delivery address or pickup location, depending on category.
    pub fulfillment_detail: String,

    /// Free-text customer notes.
    pub notes: Option<String>,

    /// When the order was placed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the status last changed.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Materializes an order from a cart snapshot.
    ///
    /// Every cart line is copied by value; totals are computed here and
    /// never recomputed afterwards.
    ///
    /// ## Errors
    /// [`ValidationError::EmptyCart`] if the cart has no lines.
    pub fn from_cart(
        customer_id: impl Into<String>,
        cart: &Cart,
        category: OrderCategory,
        fulfillment_detail: impl Into<String>,
        notes: Option<String>,
        tax_rate: TaxRate,
    ) -> CoreResult<Order> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }

        let lines: Vec<OrderLine> = cart
            .lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product_id.clone(),
                name: l.name.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
                size: l.size,
                line_total: l.line_total(),
            })
            .collect();

        let subtotal = cart.subtotal();
        let tax = subtotal.calculate_tax(tax_rate);
        let delivery_fee = category.delivery_fee();
        let total = subtotal + tax + delivery_fee;
        let now = Utc::now();

        Ok(Order {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            lines,
            category,
            status: OrderStatus::Pending,
            subtotal,
            tax_rate,
            tax,
            delivery_fee,
            total,
            fulfillment_detail: fulfillment_detail.into(),
            notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a status transition, enforcing the state machine.
    ///
    /// ## Errors
    /// [`CoreError::InvalidStatusTransition`] when the move is backward,
    /// skips a step, or leaves a terminal state.
    pub fn apply_status(&mut self, to: OrderStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(CoreError::InvalidStatusTransition {
                order_id: self.id.clone(),
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Estimated preparation time in minutes, derived from the category.
    pub fn estimated_prep_minutes(&self) -> u32 {
        self.category.estimated_prep_minutes()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, ProductKind};

    fn product(id: &str, price: i64, kind: ProductKind) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            price: Money::from_minor(price),
            kind,
            available: true,
            image_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn cart_with_two_lines() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(
            &product("a", 35_000, ProductKind::Drink { hot: true }),
            2,
            ItemSize::M,
        )
        .unwrap();
        cart.add_line(
            &product("b", 25_000, ProductKind::Food { vegetarian: false }),
            1,
            ItemSize::M,
        )
        .unwrap();
        cart
    }

    #[test]
    fn test_checkout_totals() {
        let cart = cart_with_two_lines();
        let order = Order::from_cart(
            "c-1",
            &cart,
            OrderCategory::Standard,
            "12 Nguyen Hue",
            None,
            TaxRate::from_bps(1000),
        )
        .unwrap();

        // 35 000 × 2 + 25 000 = 95 000; +10% tax; +25 000 standard fee
        assert_eq!(order.subtotal.minor(), 95_000);
        assert_eq!(order.tax.minor(), 9_500);
        assert_eq!(order.delivery_fee.minor(), 25_000);
        assert_eq!(order.total.minor(), 129_500);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.lines.len(), 2);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new();
        let err = Order::from_cart(
            "c-1",
            &cart,
            OrderCategory::Standard,
            "12 Nguyen Hue",
            None,
            TaxRate::from_bps(1000),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyCart)
        ));
    }

    #[test]
    fn test_express_fee_and_prep_time() {
        let cart = cart_with_two_lines();
        let order = Order::from_cart(
            "c-1",
            &cart,
            OrderCategory::Express,
            "counter 3",
            None,
            TaxRate::from_bps(1000),
        )
        .unwrap();

        assert_eq!(order.delivery_fee.minor(), 50_000);
        assert_eq!(order.estimated_prep_minutes(), 15);
        assert!(order.category.is_priority());
    }

    #[test]
    fn test_forward_transitions() {
        let cart = cart_with_two_lines();
        let mut order = Order::from_cart(
            "c-1",
            &cart,
            OrderCategory::Standard,
            "12 Nguyen Hue",
            None,
            TaxRate::from_bps(1000),
        )
        .unwrap();

        order.apply_status(OrderStatus::Confirmed).unwrap();
        order.apply_status(OrderStatus::Preparing).unwrap();
        order.apply_status(OrderStatus::Ready).unwrap();
        order.apply_status(OrderStatus::Delivered).unwrap();
        assert!(order.status.is_terminal());
    }

    #[test]
    fn test_backward_and_skip_transitions_rejected() {
        let cart = cart_with_two_lines();
        let mut order = Order::from_cart(
            "c-1",
            &cart,
            OrderCategory::Standard,
            "12 Nguyen Hue",
            None,
            TaxRate::from_bps(1000),
        )
        .unwrap();

        // Skipping Confirmed is not allowed
        let err = order.apply_status(OrderStatus::Ready).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));

        order.apply_status(OrderStatus::Confirmed).unwrap();
        let err = order.apply_status(OrderStatus::Pending).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_cancel_from_any_non_terminal_state() {
        for steps in 0..4 {
            let cart = cart_with_two_lines();
            let mut order = Order::from_cart(
                "c-1",
                &cart,
                OrderCategory::Standard,
                "12 Nguyen Hue",
                None,
                TaxRate::from_bps(1000),
            )
            .unwrap();

            let path = [
                OrderStatus::Confirmed,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Delivered,
            ];
            for status in path.iter().take(steps) {
                order.apply_status(*status).unwrap();
            }
            order.apply_status(OrderStatus::Cancelled).unwrap();
            assert_eq!(order.status, OrderStatus::Cancelled);
        }
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        let cart = cart_with_two_lines();
        let mut order = Order::from_cart(
            "c-1",
            &cart,
            OrderCategory::Standard,
            "12 Nguyen Hue",
            None,
            TaxRate::from_bps(1000),
        )
        .unwrap();

        order.apply_status(OrderStatus::Cancelled).unwrap();
        let err = order.apply_status(OrderStatus::Confirmed).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_snapshot_isolation_from_cart_clear() {
        let mut cart = cart_with_two_lines();
        let order = Order::from_cart(
            "c-1",
            &cart,
            OrderCategory::Standard,
            "12 Nguyen Hue",
            None,
            TaxRate::from_bps(1000),
        )
        .unwrap();

        cart.clear();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total.minor(), 129_500);
    }
}
