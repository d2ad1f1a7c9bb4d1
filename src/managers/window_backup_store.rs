//! Window Backup Store for SessionVault.
//!
//! Per-window staging buffer: the most recent snapshot of each currently
//! open window lives under a single durable key, as one JSON object keyed
//! by window id. Also owns the legacy single-snapshot slot kept for
//! backward compatibility.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::storage::{keys, DurableStore};
use crate::types::backup::{BackupCapture, WindowBackup};
use crate::types::errors::BackupError;

/// Trait defining window backup staging operations.
#[async_trait]
pub trait WindowBackupStoreTrait: Send + Sync {
    /// Stages a backup, replacing any prior backup for the same window.
    async fn save(&self, backup: WindowBackup) -> Result<(), BackupError>;
    /// Reads one window's staged backup.
    async fn get(&self, window_id: u64) -> Result<Option<WindowBackup>, BackupError>;
    /// Reads every staged backup, keyed by window id.
    async fn all(&self) -> Result<BTreeMap<u64, WindowBackup>, BackupError>;
    /// Removes one window's staged backup. Clearing an absent entry is a no-op.
    async fn clear(&self, window_id: u64) -> Result<(), BackupError>;
    /// Removes every staged backup in one write.
    async fn clear_all(&self) -> Result<(), BackupError>;
    /// Reads the legacy single-snapshot backup, if one exists.
    async fn legacy(&self) -> Result<Option<BackupCapture>, BackupError>;
    /// Stages a legacy single-snapshot backup.
    async fn save_legacy(&self, backup: BackupCapture) -> Result<(), BackupError>;
    /// Removes the legacy single-snapshot backup.
    async fn clear_legacy(&self) -> Result<(), BackupError>;
}

/// Window backup staging backed by the durable store.
#[derive(Clone)]
pub struct WindowBackupStore {
    store: Arc<dyn DurableStore>,
}

impl WindowBackupStore {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, WindowBackup>, BackupError> {
        match self
            .store
            .get(keys::WINDOW_BACKUPS)
            .await
            .map_err(|e| BackupError::StoreError(e.to_string()))?
        {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| BackupError::SerializationError(e.to_string())),
            None => Ok(BTreeMap::new()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, WindowBackup>) -> Result<(), BackupError> {
        let value =
            serde_json::to_value(map).map_err(|e| BackupError::SerializationError(e.to_string()))?;
        self.store
            .set(keys::WINDOW_BACKUPS, value)
            .await
            .map_err(|e| BackupError::StoreError(e.to_string()))
    }
}

#[async_trait]
impl WindowBackupStoreTrait for WindowBackupStore {
    async fn save(&self, backup: WindowBackup) -> Result<(), BackupError> {
        let mut map = self.read_map().await?;
        map.insert(backup.window_id.to_string(), backup);
        self.write_map(&map).await
    }

    async fn get(&self, window_id: u64) -> Result<Option<WindowBackup>, BackupError> {
        let map = self.read_map().await?;
        Ok(map.get(&window_id.to_string()).cloned())
    }

    async fn all(&self) -> Result<BTreeMap<u64, WindowBackup>, BackupError> {
        let map = self.read_map().await?;
        let mut by_id = BTreeMap::new();
        for (key, backup) in map {
            match key.parse::<u64>() {
                Ok(window_id) => {
                    by_id.insert(window_id, backup);
                }
                Err(_) => warn!(key = %key, "ignoring staged backup with malformed window id"),
            }
        }
        Ok(by_id)
    }

    async fn clear(&self, window_id: u64) -> Result<(), BackupError> {
        let mut map = self.read_map().await?;
        if map.remove(&window_id.to_string()).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), BackupError> {
        self.store
            .remove(keys::WINDOW_BACKUPS)
            .await
            .map_err(|e| BackupError::StoreError(e.to_string()))
    }

    async fn legacy(&self) -> Result<Option<BackupCapture>, BackupError> {
        match self
            .store
            .get(keys::BACKUP_CAPTURE)
            .await
            .map_err(|e| BackupError::StoreError(e.to_string()))?
        {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| BackupError::SerializationError(e.to_string())),
            None => Ok(None),
        }
    }

    async fn save_legacy(&self, backup: BackupCapture) -> Result<(), BackupError> {
        let value = serde_json::to_value(&backup)
            .map_err(|e| BackupError::SerializationError(e.to_string()))?;
        self.store
            .set(keys::BACKUP_CAPTURE, value)
            .await
            .map_err(|e| BackupError::StoreError(e.to_string()))
    }

    async fn clear_legacy(&self) -> Result<(), BackupError> {
        self.store
            .remove(keys::BACKUP_CAPTURE)
            .await
            .map_err(|e| BackupError::StoreError(e.to_string()))
    }
}
