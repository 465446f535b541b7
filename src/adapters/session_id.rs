//! Durable client session identifier.

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::SessionId;
use crate::store::DurableStore;
use crate::traits::SessionIdProvider;

/// Durable key holding the client session id.
pub const SESSION_ID_KEY: &str = "superego_sessionId";

/// Session id stored in the durable store, generated (UUID v4) on first use.
#[derive(Debug, Clone)]
pub struct PersistedSessionId {
    store: DurableStore,
}

impl PersistedSessionId {
    pub fn new(store: DurableStore) -> Self {
        Self { store }
    }
}

impl SessionIdProvider for PersistedSessionId {
    fn get_or_create(&self) -> SessionId {
        let result = self.store.update_if(SESSION_ID_KEY, String::new(), |id| {
            if !id.is_empty() {
                return false;
            }
            *id = Uuid::new_v4().to_string();
            true
        });

        match result {
            Ok((id, created)) => {
                if created {
                    info!(session_id = %id, "Created client session id");
                }
                id
            }
            Err(e) => {
                // The id still lives in the store's in-process cache; only
                // the disk copy is missing.
                warn!(error = %e, "Failed to persist client session id");
                self.store.get_or(SESSION_ID_KEY, String::new())
            }
        }
    }
}
