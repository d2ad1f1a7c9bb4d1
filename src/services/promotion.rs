//! Session promotion for SessionVault.
//!
//! Converting a staged backup into a durable session is shared between
//! startup recovery and window close handling; both use the same rule.

use tracing::{error, info};

use crate::managers::session_repository::{SessionRepository, SessionRepositoryTrait};
use crate::types::errors::SessionError;
use crate::types::session::{Session, SessionStatus};
use crate::types::tab::Tab;

/// Builds a durable session from a staged backup's contents.
///
/// The session gets a fresh id; the captured timestamp and the tab list
/// (including capture-time tab ids) are carried over verbatim. No side
/// effects — callers persist the session and clear the source backup only
/// after the persist succeeds.
pub fn promote(captured_at: i64, tabs: &[Tab]) -> Session {
    Session {
        id: Session::generate_id(),
        captured_at,
        status: SessionStatus::ToDo,
        tabs: tabs.to_vec(),
    }
}

/// Persists a session and confirms it by reading the list back.
///
/// A session missing on readback is logged loudly but not treated as
/// fatal; the write may still become visible later.
pub async fn persist_and_verify(
    sessions: &SessionRepository,
    session: Session,
) -> Result<String, SessionError> {
    let session_id = session.id.clone();
    let tab_count = session.tabs.len();
    sessions.create(session).await?;

    let stored = sessions.list().await?;
    if stored.iter().any(|s| s.id == session_id) {
        info!(session_id = %session_id, tabs = tab_count, "session verified in store");
    } else {
        error!(session_id = %session_id, "session not found in store after save");
    }
    Ok(session_id)
}
