use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ThreadId;

/// Run status of a backend thread.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    /// Waiting for input
    #[default]
    Idle,
    /// A run is in progress
    Busy,
    /// Paused on a human-in-the-loop checkpoint
    Interrupted,
    /// The last run failed
    Error,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl ThreadStatus {
    /// True while the backend is still working on the thread.
    pub fn is_active(&self) -> bool {
        matches!(self, ThreadStatus::Busy)
    }
}

/// Most recent snapshot of a thread's status and content.
///
/// Volatile: lives only in the [`ThreadCache`](crate::thread_cache::ThreadCache).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadCacheData {
    pub thread_id: ThreadId,
    #[serde(default)]
    pub status: ThreadStatus,
    /// Latest thread state values as returned by the backend
    #[serde(default)]
    pub values: serde_json::Value,
    /// When this snapshot was fetched or written locally
    pub fetched_at: DateTime<Utc>,
}

impl ThreadCacheData {
    pub fn new(thread_id: impl Into<ThreadId>, status: ThreadStatus, values: serde_json::Value) -> Self {
        Self {
            thread_id: thread_id.into(),
            status,
            values,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserializes_lowercase() {
        let status: ThreadStatus = serde_json::from_str("\"interrupted\"").unwrap();
        assert_eq!(status, ThreadStatus::Interrupted);
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let status: ThreadStatus = serde_json::from_str("\"paused_forever\"").unwrap();
        assert_eq!(status, ThreadStatus::Unknown);
        assert!(!status.is_active());
    }

    #[test]
    fn test_busy_is_active() {
        assert!(ThreadStatus::Busy.is_active());
        assert!(!ThreadStatus::Idle.is_active());
    }
}
