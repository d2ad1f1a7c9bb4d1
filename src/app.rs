//! Background process root for SessionVault.
//!
//! Owns the capture scheduler, recovery engine, and window lifecycle
//! handler, and drives them from host events. The one ordering rule that
//! matters lives here: on a true browser startup, recovery runs to
//! completion before the first capture tick is allowed.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::BackgroundConfig;
use crate::host::events::HostEvent;
use crate::host::WindowProvider;
use crate::managers::session_repository::SessionRepository;
use crate::managers::window_backup_store::WindowBackupStore;
use crate::services::capture::CaptureScheduler;
use crate::services::lifecycle::WindowLifecycleHandler;
use crate::services::recovery::RecoveryEngine;
use crate::storage::DurableStore;

/// The background capture/recovery process.
pub struct Background {
    scheduler: CaptureScheduler,
    recovery: RecoveryEngine,
    lifecycle: WindowLifecycleHandler,
    recovered: bool,
}

impl Background {
    /// Wires the background components over a shared store and host seam.
    pub fn new(
        store: Arc<dyn DurableStore>,
        provider: Arc<dyn WindowProvider>,
        config: BackgroundConfig,
    ) -> Self {
        let backups = WindowBackupStore::new(store.clone());
        let sessions = SessionRepository::new(store);
        Self {
            scheduler: CaptureScheduler::new(
                provider,
                backups.clone(),
                config.capture_interval(),
            ),
            recovery: RecoveryEngine::new(backups.clone(), sessions.clone()),
            lifecycle: WindowLifecycleHandler::new(backups, sessions),
            recovered: false,
        }
    }

    /// Attaches the process to a host event stream.
    ///
    /// Spawns the event loop and hands back its sender half; nothing is
    /// registered as an import-time side effect, so tests can attach and
    /// detach freely.
    pub fn attach(mut self) -> BackgroundHandle {
        let (events, mut receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                self.handle_event(event).await;
            }
            self.scheduler.stop();
            debug!("background event loop detached");
        });
        BackgroundHandle { events, task }
    }

    async fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Startup => {
                info!("browser startup detected");
                // Recovery must finish before the first capture tick runs:
                // a tick that ran first would stage fresh backups under
                // window ids recovery is about to read as history.
                if self.recovered {
                    warn!("startup signal received twice, skipping recovery");
                } else {
                    self.recovered = true;
                    match self.recovery.recover().await {
                        Ok(report) => info!(
                            legacy = report.legacy_recovered,
                            recovered = report.windows_recovered,
                            failed = report.windows_failed,
                            "startup recovery complete"
                        ),
                        Err(e) => error!(error = %e, "startup recovery failed"),
                    }
                }
                self.scheduler.start();
            }
            HostEvent::Installed(reason) => {
                // Fresh install or update: nothing staged to recover.
                info!(?reason, "extension installed, starting capture");
                self.scheduler.start();
            }
            HostEvent::WindowClosed(window_id) => {
                match self.lifecycle.handle_window_closed(window_id).await {
                    Ok(Some(session_id)) => {
                        info!(window_id, session_id = %session_id, "closed window saved as session");
                    }
                    Ok(None) => {
                        debug!(window_id, "closed window had nothing staged");
                    }
                    Err(e) => {
                        error!(window_id, error = %e, "failed to save session for closed window");
                    }
                }
            }
        }
    }
}

/// Handle to an attached background process.
pub struct BackgroundHandle {
    events: mpsc::UnboundedSender<HostEvent>,
    task: JoinHandle<()>,
}

impl BackgroundHandle {
    /// A sender for injecting host events.
    pub fn events(&self) -> mpsc::UnboundedSender<HostEvent> {
        self.events.clone()
    }

    /// Detaches the event loop, stopping the capture scheduler, and waits
    /// for in-flight event handling to finish.
    pub async fn detach(self) {
        drop(self.events);
        let _ = self.task.await;
    }
}
