//! Core data types for SessionVault.

pub mod backup;
pub mod errors;
pub mod note;
pub mod session;
pub mod tab;

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Random 9-character suffix for generated ids.
pub(crate) fn id_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..9].to_string()
}
