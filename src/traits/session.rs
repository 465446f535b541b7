//! Client session identifier capability.

use crate::models::SessionId;

/// Supplies the identifier this client sends as `session_id` on key
/// submission, creating one on first use.
pub trait SessionIdProvider: Send + Sync {
    fn get_or_create(&self) -> SessionId;
}
