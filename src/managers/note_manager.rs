//! Note Manager for SessionVault.
//!
//! Per-tab free-text notes, keyed by (session id, tab id). Same
//! read-modify-write pattern over one durable key as the session list.

use std::sync::Arc;

use async_trait::async_trait;

use crate::storage::{keys, DurableStore};
use crate::types::errors::NoteError;
use crate::types::note::Note;

/// Trait defining note operations.
#[async_trait]
pub trait NoteManagerTrait: Send + Sync {
    /// Returns all notes.
    async fn list(&self) -> Result<Vec<Note>, NoteError>;
    /// Returns the note for one tab of one session, if any.
    async fn get(&self, session_id: &str, tab_id: &str) -> Result<Option<Note>, NoteError>;
    /// Inserts a note, or replaces the one for the same (session, tab) pair.
    async fn save(&self, note: Note) -> Result<(), NoteError>;
    /// Deletes a note. Deleting an absent note is a no-op.
    async fn delete(&self, session_id: &str, tab_id: &str) -> Result<(), NoteError>;
}

/// Note manager backed by the durable store.
#[derive(Clone)]
pub struct NoteManager {
    store: Arc<dyn DurableStore>,
}

impl NoteManager {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    async fn read_list(&self) -> Result<Vec<Note>, NoteError> {
        match self
            .store
            .get(keys::NOTES)
            .await
            .map_err(|e| NoteError::StoreError(e.to_string()))?
        {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| NoteError::SerializationError(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    async fn write_list(&self, notes: &[Note]) -> Result<(), NoteError> {
        let value =
            serde_json::to_value(notes).map_err(|e| NoteError::SerializationError(e.to_string()))?;
        self.store
            .set(keys::NOTES, value)
            .await
            .map_err(|e| NoteError::StoreError(e.to_string()))
    }
}

#[async_trait]
impl NoteManagerTrait for NoteManager {
    async fn list(&self) -> Result<Vec<Note>, NoteError> {
        self.read_list().await
    }

    async fn get(&self, session_id: &str, tab_id: &str) -> Result<Option<Note>, NoteError> {
        let notes = self.read_list().await?;
        Ok(notes
            .into_iter()
            .find(|n| n.session_id == session_id && n.tab_id == tab_id))
    }

    async fn save(&self, note: Note) -> Result<(), NoteError> {
        let mut notes = self.read_list().await?;
        match notes
            .iter_mut()
            .find(|n| n.session_id == note.session_id && n.tab_id == note.tab_id)
        {
            Some(existing) => *existing = note,
            None => notes.push(note),
        }
        self.write_list(&notes).await
    }

    async fn delete(&self, session_id: &str, tab_id: &str) -> Result<(), NoteError> {
        let mut notes = self.read_list().await?;
        notes.retain(|n| !(n.session_id == session_id && n.tab_id == tab_id));
        self.write_list(&notes).await
    }
}
