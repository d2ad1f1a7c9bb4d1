use serde::{Deserialize, Serialize};

use super::tab::{Tab, TabStatus};
use super::{id_suffix, now_millis};

/// Triage state of a durable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Pending,
    ToDo,
    Organised,
    Archived,
}

/// A durable record of one window's tabs at the moment they were captured.
///
/// `captured_at` is inherited from the backup the session was promoted from,
/// never the promotion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(rename = "timestamp")]
    pub captured_at: i64,
    pub status: SessionStatus,
    pub tabs: Vec<Tab>,
}

impl Session {
    /// Generates a session id: `session_<epoch millis>_<suffix>`.
    ///
    /// The millisecond prefix keeps ids ordered by generation time.
    pub fn generate_id() -> String {
        format!("session_{}_{}", now_millis(), id_suffix())
    }
}

/// Lightweight session listing info, without the tab payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    pub id: String,
    #[serde(rename = "timestamp")]
    pub captured_at: i64,
    pub status: SessionStatus,
    pub tab_count: usize,
    pub pending_tab_count: usize,
}

impl SessionMetadata {
    /// Summarizes a session for list views.
    pub fn of(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            captured_at: session.captured_at,
            status: session.status,
            tab_count: session.tabs.len(),
            pending_tab_count: session
                .tabs
                .iter()
                .filter(|t| t.status == TabStatus::Pending)
                .count(),
        }
    }
}

/// Partial update applied to a stored session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPatch {
    pub status: Option<SessionStatus>,
    pub tabs: Option<Vec<Tab>>,
}
