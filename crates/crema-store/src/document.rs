//! # Document Contract
//!
//! The persistence port the engine programs against.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  load(collection, key)      → Some(document) | None                 │
//! │  load_all(collection)       → documents in insertion order          │
//! │  save(collection, docs)     → upsert each document by its "id"      │
//! │  delete(collection, key)    → true if something was removed         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//! Documents are flat JSON records mirroring the entity attributes; the
//! `"id"` field is the key. Saving an existing key replaces the document
//! in place without changing its position in `load_all` order.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Collections
// =============================================================================

/// The fixed set of document collections the storefront persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Orders,
    Customers,
}

impl Collection {
    /// Stable collection name used as the storage key prefix.
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Customers => "customers",
        }
    }
}

// =============================================================================
// Document Type
// =============================================================================

/// A persisted record: a flat JSON object with an `"id"` string field.
pub type Document = Value;

/// Extracts the key of a document, failing if it has no string `"id"`.
pub(crate) fn document_key(collection: Collection, doc: &Document) -> StoreResult<String> {
    doc.get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(StoreError::MissingId {
            collection: collection.name(),
        })
}

// =============================================================================
// The Port
// =============================================================================

/// Generic keyed document persistence.
///
/// Implementations must be safe to share across tasks; the engine holds
/// one behind an `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads one document by key, or None when absent.
    async fn load(&self, collection: Collection, key: &str) -> StoreResult<Option<Document>>;

    /// Loads every document of a collection in insertion order.
    async fn load_all(&self, collection: Collection) -> StoreResult<Vec<Document>>;

    /// Upserts a batch of documents, each keyed by its `"id"` field.
    async fn save(&self, collection: Collection, docs: &[Document]) -> StoreResult<()>;

    /// Deletes one document by key. Returns whether anything was removed;
    /// deleting an absent key is not an error.
    async fn delete(&self, collection: Collection, key: &str) -> StoreResult<bool>;
}

// =============================================================================
// JSON Helpers
// =============================================================================

/// Encodes an entity into its persisted document shape.
pub fn to_document<T: Serialize>(collection: Collection, entity: &T) -> StoreResult<Document> {
    serde_json::to_value(entity)
        .map_err(|e| StoreError::invalid_document(collection.name(), e.to_string()))
}

/// Decodes a persisted document back into an entity.
pub fn from_document<T: DeserializeOwned>(
    collection: Collection,
    doc: Document,
) -> StoreResult<T> {
    serde_json::from_value(doc)
        .map_err(|e| StoreError::invalid_document(collection.name(), e.to_string()))
}
