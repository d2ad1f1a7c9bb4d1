//! Capture Scheduler for SessionVault.
//!
//! Periodically snapshots every open window's tabs into the Window Backup
//! Store. The first tick runs immediately at start to keep the data-loss
//! window small on a freshly started process; failures during a tick are
//! logged and the schedule keeps going.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::host::{HostWindow, WindowProvider};
use crate::managers::window_backup_store::{WindowBackupStore, WindowBackupStoreTrait};
use crate::types::backup::WindowBackup;
use crate::types::errors::HostError;
use crate::types::now_millis;
use crate::types::tab::{Tab, TabStatus};

/// What one capture pass staged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Windows that produced a staged backup.
    pub windows: usize,
    /// Tabs captured across those windows.
    pub tabs: usize,
}

/// Runs a single capture pass over every open window.
///
/// Each window with an id and at least one tab gets a wholesale staged
/// backup with freshly generated tab ids; windows with no id or no tabs
/// are skipped — a window mid-teardown is expected, not an error. A
/// staging write that fails is logged and the remaining windows are still
/// processed.
pub async fn capture_once(
    provider: &dyn WindowProvider,
    backups: &WindowBackupStore,
) -> Result<CaptureStats, HostError> {
    let windows = provider.all_windows().await?;

    if windows.is_empty() {
        debug!("no windows found, nothing to capture");
        return Ok(CaptureStats::default());
    }

    let mut stats = CaptureStats::default();
    for window in &windows {
        let Some(backup) = stage_window(window) else {
            continue;
        };
        let window_id = backup.window_id;
        let tab_count = backup.tabs.len();
        match backups.save(backup).await {
            Ok(()) => {
                stats.windows += 1;
                stats.tabs += tab_count;
            }
            Err(e) => warn!(window_id, error = %e, "failed to stage window backup"),
        }
    }

    debug!(
        windows = stats.windows,
        tabs = stats.tabs,
        "backup capture pass complete"
    );
    Ok(stats)
}

/// Converts one host window into a staged backup, or `None` when the
/// window has no id or no tabs.
fn stage_window(window: &HostWindow) -> Option<WindowBackup> {
    let window_id = window.id?;
    if window.tabs.is_empty() {
        return None;
    }

    let tabs = window
        .tabs
        .iter()
        .map(|host_tab| Tab {
            id: Tab::generate_id(),
            title: host_tab
                .title
                .clone()
                .unwrap_or_else(|| "Untitled".to_string()),
            url: host_tab.url.clone().unwrap_or_default(),
            status: TabStatus::Pending,
            fav_icon_url: host_tab.fav_icon_url.clone(),
        })
        .collect();

    Some(WindowBackup {
        window_id,
        captured_at: now_millis(),
        tabs,
    })
}

/// Periodic capture driver, owned by the background process root.
///
/// `start` spawns the timer task; `stop` cancels future ticks without
/// interrupting one already in flight.
pub struct CaptureScheduler {
    provider: Arc<dyn WindowProvider>,
    backups: WindowBackupStore,
    period: Duration,
    task: Option<(watch::Sender<bool>, JoinHandle<()>)>,
}

impl CaptureScheduler {
    pub fn new(
        provider: Arc<dyn WindowProvider>,
        backups: WindowBackupStore,
        period: Duration,
    ) -> Self {
        Self {
            provider,
            backups,
            period,
            task: None,
        }
    }

    /// Returns whether the periodic capture task is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.task
            .as_ref()
            .map(|(_, handle)| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Starts periodic capture. The first tick runs immediately.
    ///
    /// Starting an already-running scheduler is a no-op.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let provider = self.provider.clone();
        let backups = self.backups.clone();
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        // The stop signal is only observed between ticks; an
                        // in-flight pass always runs to completion.
                        if let Err(e) = capture_once(provider.as_ref(), &backups).await {
                            warn!(error = %e, "capture tick failed");
                        }
                    }
                }
            }
            debug!("capture loop exited");
        });

        self.task = Some((shutdown_tx, handle));
        info!(period_ms = self.period.as_millis() as u64, "capture scheduler started");
    }

    /// Cancels future ticks. An in-flight tick is not interrupted.
    ///
    /// Stopping an already-stopped scheduler is a no-op.
    pub fn stop(&mut self) {
        if let Some((shutdown_tx, _handle)) = self.task.take() {
            let _ = shutdown_tx.send(true);
            info!("capture scheduler stopped");
        }
    }
}
