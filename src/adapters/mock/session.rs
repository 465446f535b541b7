//! Test double for [`SessionIdProvider`].

use crate::models::SessionId;
use crate::traits::SessionIdProvider;

/// Always returns the same session id.
#[derive(Debug, Clone)]
pub struct FixedSessionId(pub SessionId);

impl FixedSessionId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl SessionIdProvider for FixedSessionId {
    fn get_or_create(&self) -> SessionId {
        self.0.clone()
    }
}
