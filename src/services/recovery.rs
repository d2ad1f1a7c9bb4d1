//! Recovery Engine for SessionVault.
//!
//! Runs once per true browser cold start: promotes every staged backup the
//! previous browser session left behind into a durable session, then clears
//! the staging area. Must complete before the capture scheduler starts —
//! a capture tick that ran first would stage fresh backups under window ids
//! about to be reused, and recovery would promote that wrong data into a
//! fabricated history entry.

use tracing::{debug, error, info, warn};

use crate::managers::session_repository::SessionRepository;
use crate::managers::window_backup_store::{WindowBackupStore, WindowBackupStoreTrait};
use crate::services::promotion::{persist_and_verify, promote};
use crate::types::errors::RecoveryError;

/// Outcome of one recovery pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// A legacy single-snapshot backup was promoted.
    pub legacy_recovered: bool,
    /// Window backups promoted into sessions.
    pub windows_recovered: usize,
    /// Window backups whose promotion failed; their siblings were still
    /// processed.
    pub windows_failed: usize,
    /// The staging area is empty after the pass.
    pub staging_cleared: bool,
}

/// Startup recovery over the staged backups.
pub struct RecoveryEngine {
    backups: WindowBackupStore,
    sessions: SessionRepository,
}

impl RecoveryEngine {
    pub fn new(backups: WindowBackupStore, sessions: SessionRepository) -> Self {
        Self { backups, sessions }
    }

    /// Drains the legacy slot and every staged window backup into durable
    /// sessions, then bulk-clears the staging area.
    ///
    /// Individual promotion failures are logged and counted without
    /// blocking the remaining windows. A failed bulk clear is reported in
    /// the result but never rolls promotions back: duplicate sessions on a
    /// later retry are acceptable, lost sessions are not.
    pub async fn recover(&self) -> Result<RecoveryReport, RecoveryError> {
        let mut report = RecoveryReport::default();

        self.recover_legacy(&mut report).await;

        let staged = self
            .backups
            .all()
            .await
            .map_err(|e| RecoveryError::BackupStore(e.to_string()))?;

        if staged.is_empty() {
            debug!("no window backups to recover");
            report.staging_cleared = true;
            return Ok(report);
        }

        info!(windows = staged.len(), "recovering window backups");
        for (window_id, backup) in &staged {
            if backup.tabs.is_empty() {
                debug!(window_id, "staged backup has no tabs, skipping");
                continue;
            }
            let session = promote(backup.captured_at, &backup.tabs);
            match persist_and_verify(&self.sessions, session).await {
                Ok(session_id) => {
                    info!(window_id, session_id = %session_id, "window backup recovered");
                    report.windows_recovered += 1;
                }
                Err(e) => {
                    report.windows_failed += 1;
                    warn!(window_id, error = %e, "window backup promotion failed");
                }
            }
        }

        match self.backups.clear_all().await {
            Ok(()) => report.staging_cleared = true,
            Err(e) => error!(error = %e, "failed to clear window backups after recovery"),
        }

        info!(
            legacy = report.legacy_recovered,
            recovered = report.windows_recovered,
            failed = report.windows_failed,
            "window backup recovery complete"
        );
        Ok(report)
    }

    /// Step one: drain the legacy single-snapshot slot if present and
    /// non-empty, deleting it only after its session persisted.
    async fn recover_legacy(&self, report: &mut RecoveryReport) {
        let backup = match self.backups.legacy().await {
            Ok(Some(backup)) if !backup.tabs.is_empty() => backup,
            Ok(_) => return,
            Err(e) => {
                warn!(error = %e, "failed to read legacy backup");
                return;
            }
        };

        info!(tabs = backup.tabs.len(), "recovering legacy backup");
        let session = promote(backup.captured_at, &backup.tabs);
        match persist_and_verify(&self.sessions, session).await {
            Ok(_) => {
                report.legacy_recovered = true;
                if let Err(e) = self.backups.clear_legacy().await {
                    warn!(error = %e, "failed to clear legacy backup after recovery");
                }
            }
            Err(e) => warn!(error = %e, "legacy backup promotion failed"),
        }
    }
}
