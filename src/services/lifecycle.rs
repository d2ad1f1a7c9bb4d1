//! Window Lifecycle Handler for SessionVault.
//!
//! Promotes a closing window's staged backup into a durable session the
//! moment the host reports the close. This path is preferred over waiting
//! for the next capture tick because the signal fires while the background
//! process is still guaranteed alive.

use tracing::{debug, info};

use crate::managers::session_repository::SessionRepository;
use crate::managers::window_backup_store::{WindowBackupStore, WindowBackupStoreTrait};
use crate::services::promotion::{persist_and_verify, promote};
use crate::types::errors::LifecycleError;

/// Handles host "window closed" signals.
pub struct WindowLifecycleHandler {
    backups: WindowBackupStore,
    sessions: SessionRepository,
}

impl WindowLifecycleHandler {
    pub fn new(backups: WindowBackupStore, sessions: SessionRepository) -> Self {
        Self { backups, sessions }
    }

    /// Promotes the closed window's staged backup and clears just that
    /// window's staging entry.
    ///
    /// Returns the id of the created session, or `None` when the window
    /// had no staged backup or an empty one — the window may have had no
    /// tabs, or its backup was never written. The clear is idempotent, so
    /// racing a concurrent capture tick on the same window id is safe.
    pub async fn handle_window_closed(
        &self,
        window_id: u64,
    ) -> Result<Option<String>, LifecycleError> {
        let backup = self
            .backups
            .get(window_id)
            .await
            .map_err(|e| LifecycleError::BackupStore(e.to_string()))?;

        let Some(backup) = backup else {
            debug!(window_id, "no staged backup for closed window");
            return Ok(None);
        };
        if backup.tabs.is_empty() {
            debug!(window_id, "staged backup for closed window has no tabs");
            return Ok(None);
        }

        info!(
            window_id,
            tabs = backup.tabs.len(),
            "promoting backup for closed window"
        );
        let session = promote(backup.captured_at, &backup.tabs);
        let session_id = persist_and_verify(&self.sessions, session)
            .await
            .map_err(|e| LifecycleError::SessionStore(e.to_string()))?;

        self.backups
            .clear(window_id)
            .await
            .map_err(|e| LifecycleError::BackupStore(e.to_string()))?;

        Ok(Some(session_id))
    }
}
