use serde::{Deserialize, Serialize};

/// Free-text note attached to one tab of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub session_id: String,
    pub tab_id: String,
    pub text: String,
}
