//! SQLite-backed durable store.

use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::database::Database;
use crate::types::errors::StoreError;

use super::{DurableStore, StoreChange, CHANGE_CHANNEL_CAPACITY};

/// Durable store backed by the SQLite `kv_store` table.
///
/// Values are stored as JSON text. Statements run on the blocking thread
/// pool so the cooperative event loop never stalls on disk I/O.
pub struct SqliteStore {
    db: Arc<Database>,
    changes: broadcast::Sender<StoreChange>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::open(path).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self::with_database(db))
    }

    /// Opens an in-memory store, discarded on drop.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let db = Database::open_in_memory().map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self::with_database(db))
    }

    fn with_database(db: Database) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            db: Arc::new(db),
            changes,
        }
    }

    async fn run_blocking<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> Result<R, rusqlite::Error> + Send + 'static,
        R: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.with_connection(f))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn notify(&self, key: &str) {
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
        });
    }

    fn now_secs() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

#[async_trait]
impl DurableStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let key = key.to_string();
        let raw: Option<String> = self
            .run_blocking(move |conn| {
                conn.query_row(
                    "SELECT value FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;

        match raw {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let owned_key = key.to_string();
        let text = value.to_string();
        let updated_at = Self::now_secs();
        self.run_blocking(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![owned_key, text, updated_at],
            )
            .map(|_| ())
        })
        .await?;
        self.notify(key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let owned_key = key.to_string();
        self.run_blocking(move |conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", params![owned_key])
                .map(|_| ())
        })
        .await?;
        self.notify(key);
        Ok(())
    }

    fn watch(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
