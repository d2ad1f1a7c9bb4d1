//! Durable key/value store seam for SessionVault.
//!
//! The background subsystem persists everything through this narrow
//! interface: atomic get/set/remove per key, plus a change-notification
//! channel carrying the names of written keys for UI-layer listeners.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::types::errors::StoreError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage keys used by the vault.
pub mod keys {
    /// All durable sessions, stored as one JSON array.
    pub const SESSIONS: &str = "sessions";
    /// All per-tab notes, stored as one JSON array.
    pub const NOTES: &str = "notes";
    /// Legacy single-snapshot backup slot.
    pub const BACKUP_CAPTURE: &str = "backupCapture";
    /// Per-window staging backups, one JSON object keyed by window id.
    pub const WINDOW_BACKUPS: &str = "windowBackups";
}

/// Capacity of the change-notification channel. A lagging listener misses
/// older notifications instead of blocking writers.
pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Notification emitted after every successful write or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
}

/// Trait defining durable store operations.
///
/// Every access is a suspension point; callers must tolerate unrelated
/// operations completing between their own awaits.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    /// Stores `value` under `key`, replacing any prior value.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    /// Subscribes to change notifications for subsequent writes.
    fn watch(&self) -> broadcast::Receiver<StoreChange>;
}
