//! Credential encryption capability.

use async_trait::async_trait;

use crate::error::CryptoError;

/// Turns a raw API key into the payload the backend accepts as
/// `encrypted_key`.
///
/// Raw keys never leave this call: implementations must not log them.
#[async_trait]
pub trait KeyEncryptor: Send + Sync {
    async fn encrypt(&self, raw_key: &str) -> Result<String, CryptoError>;
}
