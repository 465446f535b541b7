//! Known-thread index: every ThreadId this client has ever seen.

use std::sync::Arc;
use tracing::debug;

use super::durable::{DurableStore, Persisted};
use crate::error::StorageError;
use crate::models::ThreadId;

/// Durable key of the index.
pub const KNOWN_THREADS_KEY: &str = "superego_knownThreads";

/// Durable ordered set of thread identifiers, in first-seen order.
///
/// Any code path that learns of a new ThreadId registers it here before
/// referencing it anywhere else.
#[derive(Debug, Clone)]
pub struct KnownThreadIndex {
    ids: Arc<Persisted<Vec<ThreadId>>>,
}

impl KnownThreadIndex {
    pub fn new(store: DurableStore) -> Self {
        Self {
            ids: Arc::new(Persisted::new(store, KNOWN_THREADS_KEY, Vec::new())),
        }
    }

    /// Append `thread_id` if absent. Returns true if it was newly added.
    pub fn add(&self, thread_id: &str) -> Result<bool, StorageError> {
        let added = self.ids.update_if(|ids| {
            if ids.iter().any(|id| id == thread_id) {
                return false;
            }
            ids.push(thread_id.to_string());
            true
        })?;
        if added {
            debug!(thread_id, "Registered new thread");
        }
        Ok(added)
    }

    /// All known thread ids, oldest first.
    pub fn list(&self) -> Vec<ThreadId> {
        self.ids.get()
    }

    pub fn contains(&self, thread_id: &str) -> bool {
        self.ids.get().iter().any(|id| id == thread_id)
    }

    pub fn len(&self) -> usize {
        self.ids.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Vec<ThreadId>> {
        self.ids.subscribe()
    }
}
