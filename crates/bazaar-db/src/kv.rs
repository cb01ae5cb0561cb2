//! # Key-Value Persistence
//!
//! A tiny string-keyed store for serialized snapshots.
//!
//! ## Adapters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KeyValueStore implementations                       │
//! │                                                                         │
//! │  SqliteKvStore   kv_store table in bazaar.db      (production)         │
//! │  MemoryKvStore   HashMap behind a Mutex           (tests, --ephemeral) │
//! │                                                                         │
//! │  Callers never see the backend: CartStore holds an                     │
//! │  Arc<dyn KeyValueStore> and only ever reads/writes one key.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// String-keyed persistence used for snapshot blobs.
///
/// Values are opaque to the store; callers own the encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> DbResult<()>;
}

// =============================================================================
// SQLite
// =============================================================================

/// [`KeyValueStore`] backed by the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKvStore { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing key");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        debug!(key = %key, "Removing key");

        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// [`KeyValueStore`] that lives only as long as the process.
///
/// Clones share the same map, so a test can hand one clone to the code under
/// test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        store
    }

    fn entries(&self) -> DbResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| DbError::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
