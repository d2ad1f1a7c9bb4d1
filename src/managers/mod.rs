//! SessionVault storage managers.
//!
//! Typed views over the durable store: window backup staging, session
//! records, and per-tab notes.

pub mod note_manager;
pub mod session_repository;
pub mod window_backup_store;
