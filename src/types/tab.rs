use serde::{Deserialize, Serialize};

use super::{id_suffix, now_millis};

/// Triage state of a captured tab.
///
/// Set to `Pending` at capture time; every later transition is driven by the
/// session-management UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabStatus {
    Pending,
    Done,
    Dismissed,
    Bookmarked,
    SavedToNotion,
}

/// A captured browser tab.
///
/// Identity is fixed once created; `status` is the only field that changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: String,
    pub title: String,
    pub url: String,
    pub status: TabStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
}

impl Tab {
    /// Generates a capture-time tab id: `tab_<epoch millis>_<suffix>`.
    pub fn generate_id() -> String {
        format!("tab_{}_{}", now_millis(), id_suffix())
    }
}
