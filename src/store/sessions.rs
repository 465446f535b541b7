//! Session map: UI session → session state, persisted on every mutation.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::durable::{DurableStore, Persisted};
use super::known_threads::KnownThreadIndex;
use crate::error::{StorageError, SuperegoResult};
use crate::models::{SessionId, UiSessionState};

/// Durable key of the session map.
pub const UI_SESSIONS_KEY: &str = "superego_uiSessions";

/// Sessions keyed by SessionId.
pub type Sessions = BTreeMap<SessionId, UiSessionState>;

/// Durable mapping from SessionId to [`UiSessionState`].
#[derive(Debug, Clone)]
pub struct SessionMap {
    sessions: Arc<Persisted<Sessions>>,
    known_threads: KnownThreadIndex,
}

impl SessionMap {
    pub fn new(store: DurableStore, known_threads: KnownThreadIndex) -> Self {
        Self {
            sessions: Arc::new(Persisted::new(store, UI_SESSIONS_KEY, Sessions::new())),
            known_threads,
        }
    }

    /// Create (or replace) the record for `session_id`.
    ///
    /// A thread referenced by `initial` is registered in the known-thread
    /// index first.
    pub fn create_session(&self, session_id: &str, initial: UiSessionState) -> SuperegoResult<()> {
        if let Some(thread_id) = initial.thread_id.as_deref() {
            self.known_threads.add(thread_id)?;
        }
        self.sessions.update_if(|sessions| {
            sessions.insert(session_id.to_string(), initial);
            true
        })?;
        info!(session_id, "Created session");
        Ok(())
    }

    /// Point `session_id` at `thread_id`.
    ///
    /// Registers the thread in the known-thread index before the session
    /// record is written. An unknown session is created with an empty name.
    pub fn bind_thread(&self, session_id: &str, thread_id: &str) -> SuperegoResult<UiSessionState> {
        self.known_threads.add(thread_id)?;

        let mut bound = None;
        self.sessions.update_if(|sessions| {
            let state = sessions
                .entry(session_id.to_string())
                .or_insert_with(|| UiSessionState::new(""));
            state.thread_id = Some(thread_id.to_string());
            state.last_active = Utc::now();
            bound = Some(state.clone());
            true
        })?;
        debug!(session_id, thread_id, "Bound session to thread");

        Ok(bound.unwrap_or_else(|| UiSessionState::new("").with_thread(thread_id)))
    }

    pub fn get(&self, session_id: &str) -> Option<UiSessionState> {
        self.sessions.get().remove(session_id)
    }

    /// Remove the record for `session_id`, returning it if it existed.
    pub fn remove(&self, session_id: &str) -> Result<Option<UiSessionState>, StorageError> {
        let mut removed = None;
        self.sessions.update_if(|sessions| {
            removed = sessions.remove(session_id);
            removed.is_some()
        })?;
        if removed.is_some() {
            info!(session_id, "Removed session");
        }
        Ok(removed)
    }

    /// Rename a session. Returns false if it does not exist.
    pub fn rename(&self, session_id: &str, name: &str) -> Result<bool, StorageError> {
        self.sessions.update_if(|sessions| match sessions.get_mut(session_id) {
            Some(state) => {
                state.name = name.to_string();
                true
            }
            None => false,
        })
    }

    /// Snapshot of every session.
    pub fn all(&self) -> Sessions {
        self.sessions.get()
    }

    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.get().into_keys().collect()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Sessions> {
        self.sessions.subscribe()
    }
}
