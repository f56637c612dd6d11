//! # crema-core: Pure Business Logic for the Crema Storefront
//!
//! This crate is the **heart** of the Crema coffee-shop storefront. It
//! contains all business rules as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Crema Architecture                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Web Storefront (out of scope)               │   │
//! │  │    Menu UI ──► Cart UI ──► Checkout UI ──► Order Status     │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                  crema-engine (services)                    │   │
//! │  │    CatalogManager, CartManager, OrderManager, sessions      │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │               ★ crema-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐          │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │  order  │          │   │
//! │  │   │ Product │ │  Money  │ │  Cart   │ │  Order  │          │   │
//! │  │   │ ItemSize│ │ TaxRate │ │CartLine │ │ status  │          │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘          │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐                      │   │
//! │  │   │ pricing │ │ access  │ │validation                      │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘                      │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, ProductKind, ItemSize)
//! - [`actor`] - Acting users (Customer, Admin) as a closed variant type
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Size-based effective unit prices
//! - [`cart`] - Cart and cart-line math
//! - [`order`] - Order snapshots and the status state machine
//! - [`access`] - Role predicates consulted by every mutating operation
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic where possible
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole đồng (i64)
//! 4. **Explicit Actor**: The acting user is a parameter, never ambient state
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use crema_core::money::Money;
//! use crema_core::types::{ItemSize, ProductKind};
//! use crema_core::pricing::effective_unit_price;
//!
//! // A large drink costs 1.3x the base price
//! let base = Money::from_minor(40_000);
//! let kind = ProductKind::Drink { hot: true };
//! let price = effective_unit_price(&kind, base, ItemSize::L);
//! assert_eq!(price.minor(), 52_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod actor;
pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use crema_core::Money` instead of
// `use crema_core::money::Money`

pub use actor::{Actor, AdminProfile, CustomerProfile, Role};
pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use order::{Order, OrderCategory, OrderLine, OrderStatus};
pub use types::{ItemSize, Product, ProductKind};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat tax rate applied to every order subtotal, in basis points.
/// 1000 bps = 10%.
pub const ORDER_TAX_RATE_BPS: u32 = 1000;

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps checkout snapshots a sane size.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Order total required to earn one loyalty point, in đồng.
/// 10 000 ₫ spent = 1 point.
pub const LOYALTY_POINT_UNIT: i64 = 10_000;
