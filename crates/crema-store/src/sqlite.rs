//! # SQLite Store
//!
//! SQLite-backed implementation of [`DocumentStore`].
//!
//! One table holds every collection:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  documents                                                          │
//! │  ┌────────────┬──────┬────────────────────────────────┐             │
//! │  │ collection │  id  │ body (JSON text)               │             │
//! │  ├────────────┼──────┼────────────────────────────────┤             │
//! │  │ products   │ p-1  │ {"id":"p-1","name":"Espresso"} │             │
//! │  │ orders     │ o-1  │ {"id":"o-1","status":"PENDING"}│             │
//! │  └────────────┴──────┴────────────────────────────────┘             │
//! │  PRIMARY KEY (collection, id)                                       │
//! │                                                                     │
//! │  Upserts keep the original rowid, so ORDER BY rowid preserves       │
//! │  insertion order across updates.                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! WAL journal mode is enabled: readers don't block the writer and the
//! database survives crashes cleanly.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::document::{document_key, Collection, Document, DocumentStore};
use crate::error::{StoreError, StoreResult};

/// SQLite document store backed by an async connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) a store at the given path.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let url = format!("sqlite://{}?mode=rwc", path.as_ref().display());
        info!(path = %path.as_ref().display(), "Opening document store");

        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Opens an isolated in-memory database (for tests).
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        // A single connection keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let store = SqliteStore { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id         TEXT NOT NULL,
                body       TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn load(&self, collection: Collection, key: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ?1 AND id = ?2")
            .bind(collection.name())
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| {
            let body: String = r.get("body");
            serde_json::from_str(&body)
                .map_err(|e| StoreError::invalid_document(collection.name(), e.to_string()))
        })
        .transpose()
    }

    async fn load_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let rows =
            sqlx::query("SELECT body FROM documents WHERE collection = ?1 ORDER BY rowid")
                .bind(collection.name())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|r| {
                let body: String = r.get("body");
                serde_json::from_str(&body)
                    .map_err(|e| StoreError::invalid_document(collection.name(), e.to_string()))
            })
            .collect()
    }

    async fn save(&self, collection: Collection, docs: &[Document]) -> StoreResult<()> {
        debug!(collection = collection.name(), count = docs.len(), "Saving documents");

        for doc in docs {
            let key = document_key(collection, doc)?;
            let body = doc.to_string();

            // ON CONFLICT UPDATE (not INSERT OR REPLACE) so the rowid,
            // and with it insertion order, survives upserts
            sqlx::query(
                r#"
                INSERT INTO documents (collection, id, body)
                VALUES (?1, ?2, ?3)
                ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body
                "#,
            )
            .bind(collection.name())
            .bind(&key)
            .bind(&body)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ?1 AND id = ?2")
            .bind(collection.name())
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_in_memory_store_health() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .save(Collection::Products, &[json!({"id": "p-1", "name": "Espresso"})])
            .await
            .unwrap();

        let doc = store.load(Collection::Products, "p-1").await.unwrap();
        assert_eq!(doc.unwrap()["name"], "Espresso");
    }

    #[tokio::test]
    async fn test_upsert_preserves_order() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .save(
                Collection::Products,
                &[json!({"id": "a", "n": 1}), json!({"id": "b", "n": 2})],
            )
            .await
            .unwrap();
        store
            .save(Collection::Products, &[json!({"id": "a", "n": 3})])
            .await
            .unwrap();

        let all = store.load_all(Collection::Products).await.unwrap();
        assert_eq!(all[0]["id"], "a");
        assert_eq!(all[0]["n"], 3);
        assert_eq!(all[1]["id"], "b");
    }

    #[tokio::test]
    async fn test_delete_reports_absence() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .save(Collection::Orders, &[json!({"id": "o-1"})])
            .await
            .unwrap();

        assert!(store.delete(Collection::Orders, "o-1").await.unwrap());
        assert!(!store.delete(Collection::Orders, "o-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_on_disk_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crema.db");

        let store = SqliteStore::open(&path).await.unwrap();
        store
            .save(Collection::Customers, &[json!({"id": "c-1", "username": "lan"})])
            .await
            .unwrap();
        store.close().await;

        let reopened = SqliteStore::open(&path).await.unwrap();
        let doc = reopened.load(Collection::Customers, "c-1").await.unwrap();
        assert_eq!(doc.unwrap()["username"], "lan");
    }
}
