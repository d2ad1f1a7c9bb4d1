//! Background configuration for SessionVault.

use std::time::Duration;

use serde::Deserialize;

/// Knobs for the background capture process.
///
/// Deserializable from JSON so a host shell can persist it alongside the
/// vault's other state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundConfig {
    /// Milliseconds between capture ticks. More frequent means less data
    /// lost when the browser dies between ticks.
    pub capture_interval_millis: u64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            capture_interval_millis: 10_000,
        }
    }
}

impl BackgroundConfig {
    /// The capture period as a `Duration`.
    pub fn capture_interval(&self) -> Duration {
        Duration::from_millis(self.capture_interval_millis)
    }
}
