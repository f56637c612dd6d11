//! # crema-store: Document Persistence for the Crema Storefront
//!
//! Entities persist as flat JSON documents, one per entity, keyed by id.
//! The engine only ever sees the [`DocumentStore`] trait; which engine
//! sits behind it (a HashMap or SQLite) is a wiring decision.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Crema Data Flow                               │
//! │                                                                     │
//! │  Engine service (CatalogManager, OrderManager, ...)                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  crema-store (THIS CRATE)                   │   │
//! │  │                                                             │   │
//! │  │   DocumentStore trait:  load / load_all / save / delete     │   │
//! │  │        │                                                    │   │
//! │  │        ├── MemoryStore  (tests, session-scoped runs)        │   │
//! │  │        └── SqliteStore  (sqlx pool, WAL mode)               │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - Collection names, the DocumentStore trait, JSON helpers
//! - [`memory`] - Insertion-ordered in-memory implementation
//! - [`sqlite`] - SQLite-backed implementation
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod memory;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use document::{from_document, to_document, Collection, Document, DocumentStore};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
