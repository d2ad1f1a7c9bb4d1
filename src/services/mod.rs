//! SessionVault background services.
//!
//! The capture/recovery subsystem: periodic staging of open windows,
//! startup recovery of whatever the previous browser session left behind,
//! and synchronous handling of window close signals.

pub mod capture;
pub mod lifecycle;
pub mod promotion;
pub mod recovery;
