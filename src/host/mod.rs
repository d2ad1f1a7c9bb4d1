//! Host browser seam for SessionVault.
//!
//! The hosting browser is an external collaborator: the vault only needs to
//! enumerate open windows with their tabs, and to receive the lifecycle
//! signals in [`events`]. `StaticWindowProvider` stands in for a live host
//! in tests and the demo binary.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::types::errors::HostError;

pub mod events;

/// A tab as reported by the host, before capture assigns it an identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostTab {
    pub title: Option<String>,
    pub url: Option<String>,
    pub fav_icon_url: Option<String>,
}

/// An open window as reported by the host.
///
/// A window mid-teardown may briefly report no id or no tabs; capture skips
/// those rather than treating them as errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostWindow {
    pub id: Option<u64>,
    pub tabs: Vec<HostTab>,
}

/// Trait defining host window enumeration.
#[async_trait]
pub trait WindowProvider: Send + Sync {
    /// Enumerates every currently open window with its tabs.
    async fn all_windows(&self) -> Result<Vec<HostWindow>, HostError>;
}

/// Scripted window provider for tests and the demo binary.
///
/// Holds a settable window list and can be told to fail enumeration, to
/// exercise the capture path's failure semantics.
pub struct StaticWindowProvider {
    windows: Mutex<Vec<HostWindow>>,
    failure: Mutex<Option<String>>,
}

impl StaticWindowProvider {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Replaces the scripted window list.
    pub fn set_windows(&self, windows: Vec<HostWindow>) {
        *self.windows.lock().unwrap() = windows;
    }

    /// Makes every subsequent enumeration fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Clears a previously injected failure.
    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }
}

impl Default for StaticWindowProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WindowProvider for StaticWindowProvider {
    async fn all_windows(&self) -> Result<Vec<HostWindow>, HostError> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(HostError::Unavailable(message));
        }
        Ok(self.windows.lock().unwrap().clone())
    }
}
