use serde::{Deserialize, Serialize};

use super::tab::Tab;

/// Staged snapshot of one currently open window.
///
/// Overwritten wholesale on every capture tick while its window is open and
/// deleted the moment the window closes, whether through close-handling or
/// startup recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowBackup {
    pub window_id: u64,
    #[serde(rename = "timestamp")]
    pub captured_at: i64,
    pub tabs: Vec<Tab>,
}

/// Legacy single global snapshot, from before backups were kept per window.
///
/// At most one instance ever exists; startup recovery drains it for
/// backward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupCapture {
    #[serde(rename = "timestamp")]
    pub captured_at: i64,
    pub tabs: Vec<Tab>,
}
