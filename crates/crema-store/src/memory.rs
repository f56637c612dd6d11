//! # In-Memory Store
//!
//! Insertion-ordered in-memory implementation of [`DocumentStore`].
//!
//! Backs tests and the session-scoped storefront variant where nothing
//! outlives the process. Upserts replace a document in place so
//! `load_all` keeps returning first-insert order, matching what the
//! SQLite implementation does.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::document::{document_key, Collection, Document, DocumentStore};
use crate::error::StoreResult;

/// Keyed documents held in process memory.
///
/// ## Thread Safety
/// A single `Mutex` guards the whole map. Operations are short and never
/// hold the lock across an await point, so contention is not a concern at
/// this scale.
#[derive(Debug, Default)]
pub struct MemoryStore {
    // collection → lines of (key, document), in insertion order
    collections: Mutex<HashMap<Collection, Vec<(String, Document)>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, collection: Collection, key: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.lock().expect("store mutex poisoned");
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|(k, _)| k == key))
            .map(|(_, doc)| doc.clone()))
    }

    async fn load_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let collections = self.collections.lock().expect("store mutex poisoned");
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default())
    }

    async fn save(&self, collection: Collection, docs: &[Document]) -> StoreResult<()> {
        let mut collections = self.collections.lock().expect("store mutex poisoned");
        let entries = collections.entry(collection).or_default();

        for doc in docs {
            let key = document_key(collection, doc)?;
            match entries.iter_mut().find(|(k, _)| k == &key) {
                Some((_, existing)) => *existing = doc.clone(),
                None => entries.push((key, doc.clone())),
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> StoreResult<bool> {
        let mut collections = self.collections.lock().expect("store mutex poisoned");
        let Some(entries) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = entries.len();
        entries.retain(|(k, _)| k != key);
        Ok(entries.len() != before)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
