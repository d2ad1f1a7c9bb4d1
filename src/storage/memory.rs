//! In-memory durable store used by tests and the demo binary.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::types::errors::StoreError;

use super::{DurableStore, StoreChange, CHANGE_CHANNEL_CAPACITY};

/// Durable store backed by a plain map.
///
/// Behaves like the real store at the interface level, including change
/// notifications, but keeps nothing across process restarts.
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
    changes: broadcast::Sender<StoreChange>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            entries: Mutex::new(HashMap::new()),
            changes,
        }
    }

    fn notify(&self, key: &str) {
        // No receivers is fine; notifications are fire-and-forget.
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        {
            let mut entries = self.entries.lock().unwrap();
            entries.insert(key.to_string(), value);
        }
        self.notify(key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        {
            let mut entries = self.entries.lock().unwrap();
            entries.remove(key);
        }
        self.notify(key);
        Ok(())
    }

    fn watch(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
