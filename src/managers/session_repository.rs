//! Session Repository for SessionVault.
//!
//! CRUD over durable session records. The whole session list lives under
//! one key and every mutation is a read-modify-write of that list, which
//! is fine at single-user scale; writers beyond the single cooperative
//! event loop would need external serialization.

use std::sync::Arc;

use async_trait::async_trait;

use crate::storage::{keys, DurableStore};
use crate::types::errors::SessionError;
use crate::types::session::{Session, SessionMetadata, SessionPatch, SessionStatus};

/// Trait defining session repository operations.
#[async_trait]
pub trait SessionRepositoryTrait: Send + Sync {
    /// Returns all sessions with full tab data.
    async fn list(&self) -> Result<Vec<Session>, SessionError>;
    /// Returns one session by id.
    async fn get(&self, session_id: &str) -> Result<Option<Session>, SessionError>;
    /// Returns lightweight metadata for every session.
    async fn metadata(&self) -> Result<Vec<SessionMetadata>, SessionError>;
    /// Inserts a session, or replaces the stored one with the same id.
    async fn create(&self, session: Session) -> Result<(), SessionError>;
    /// Applies a partial update. Unknown ids are silently ignored.
    async fn update(&self, session_id: &str, patch: SessionPatch) -> Result<(), SessionError>;
    /// Deletes a session. Unknown ids are silently ignored.
    async fn delete(&self, session_id: &str) -> Result<(), SessionError>;
    /// Moves a session to the archived state.
    async fn archive(&self, session_id: &str) -> Result<(), SessionError>;
    /// Restores an archived session back to the organised state.
    async fn restore(&self, session_id: &str) -> Result<(), SessionError>;
    /// Removes every session.
    async fn clear_all(&self) -> Result<(), SessionError>;
}

/// Session repository backed by the durable store.
#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn DurableStore>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    async fn read_list(&self) -> Result<Vec<Session>, SessionError> {
        match self
            .store
            .get(keys::SESSIONS)
            .await
            .map_err(|e| SessionError::StoreError(e.to_string()))?
        {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| SessionError::SerializationError(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn write_list(&self, sessions: &[Session]) -> Result<(), SessionError> {
        let value = serde_json::to_value(sessions)
            .map_err(|e| SessionError::SerializationError(e.to_string()))?;
        self.store
            .set(keys::SESSIONS, value)
            .await
            .map_err(|e| SessionError::StoreError(e.to_string()))
    }
}

#[async_trait]
impl SessionRepositoryTrait for SessionRepository {
    async fn list(&self) -> Result<Vec<Session>, SessionError> {
        self.read_list().await
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>, SessionError> {
        let sessions = self.read_list().await?;
        Ok(sessions.into_iter().find(|s| s.id == session_id))
    }

    async fn metadata(&self) -> Result<Vec<SessionMetadata>, SessionError> {
        let sessions = self.read_list().await?;
        Ok(sessions.iter().map(SessionMetadata::of).collect())
    }

    async fn create(&self, session: Session) -> Result<(), SessionError> {
        let mut sessions = self.read_list().await?;
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session,
            None => sessions.push(session),
        }
        self.write_list(&sessions).await
    }

    async fn update(&self, session_id: &str, patch: SessionPatch) -> Result<(), SessionError> {
        let mut sessions = self.read_list().await?;
        let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) else {
            return Ok(());
        };
        if let Some(status) = patch.status {
            session.status = status;
        }
        if let Some(tabs) = patch.tabs {
            session.tabs = tabs;
        }
        self.write_list(&sessions).await
    }

    async fn delete(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.read_list().await?;
        sessions.retain(|s| s.id != session_id);
        self.write_list(&sessions).await
    }

    async fn archive(&self, session_id: &str) -> Result<(), SessionError> {
        self.update(
            session_id,
            SessionPatch {
                status: Some(SessionStatus::Archived),
                ..SessionPatch::default()
            },
        )
        .await
    }

    async fn restore(&self, session_id: &str) -> Result<(), SessionError> {
        self.update(
            session_id,
            SessionPatch {
                status: Some(SessionStatus::Organised),
                ..SessionPatch::default()
            },
        )
        .await
    }

    async fn clear_all(&self) -> Result<(), SessionError> {
        self.write_list(&[]).await
    }
}
