//! # crema-engine: Storefront Services for Crema
//!
//! The small imperative API a presentation layer drives:
//!
//! - Catalog: create, update, delete, list available, get by id
//! - Cart: add item, update quantity, update size, get cart, clear
//! - Order: create, update status, get by id, list
//! - Sessions: register, login, logout, resolve actor
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │  resolve_actor(token) ──► Actor ──┐  (explicit parameter, never     │
//! │                                   │   ambient state)                │
//! │        ┌──────────────────────────┼──────────────────┐              │
//! │        ▼                          ▼                  ▼              │
//! │  CatalogManager            CartManager          OrderManager        │
//! │   admin mutations           customer edits       checkout +         │
//! │   availability reads        price snapshots      status machine     │
//! │        │                          │                  │              │
//! │        └── copies price ─────────►│                  │              │
//! │                                   └── cart snapshot ►│              │
//! │                                                                     │
//! │  After checkout the order is fully decoupled: catalog edits never   │
//! │  reach placed orders.                                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storefront`] - Facade that hydrates and wires the managers
//! - [`catalog`] - Product CRUD and availability listing
//! - [`cart`] - Per-customer carts keyed by customer id
//! - [`orders`] - Checkout, status transitions, order access
//! - [`session`] - Session tokens, the user directory, loyalty points
//! - [`seed`] - First-run catalog import collaborator
//! - [`repo`] - Insertion-ordered id → entity maps
//! - [`config`] - Shop configuration
//! - [`error`] - The unified service error

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod repo;
pub mod seed;
pub mod session;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartManager;
pub use catalog::{CatalogManager, ProductDraft, ProductPatch};
pub use config::ShopConfig;
pub use error::{ShopError, ShopResult};
pub use orders::OrderManager;
pub use seed::{CatalogSeed, MenuSeed, RawProductRecord};
pub use session::{SessionToken, UserDirectory};
pub use storefront::Storefront;
