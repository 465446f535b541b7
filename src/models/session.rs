use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ThreadId;

/// Per-session record kept in the Session Map.
///
/// Field names are camelCase on disk so that records written by earlier
/// clients under `superego_uiSessions` keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UiSessionState {
    /// Thread this session targets; must already be in the known-thread index
    #[serde(default)]
    pub thread_id: Option<ThreadId>,
    /// Display name of the tab
    #[serde(default)]
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub last_active: DateTime<Utc>,
}

impl UiSessionState {
    /// A fresh session that does not target any thread yet.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            thread_id: None,
            name: name.into(),
            created_at: now,
            last_active: now,
        }
    }

    pub fn with_thread(mut self, thread_id: impl Into<ThreadId>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }
}
