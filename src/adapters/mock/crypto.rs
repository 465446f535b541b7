//! Test double for [`KeyEncryptor`].

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::CryptoError;
use crate::traits::KeyEncryptor;

/// Deterministic encryptor: `raw` becomes `enc(<reversed raw>)`.
///
/// Can be told to fail, and remembers how many keys it encrypted.
#[derive(Debug, Clone, Default)]
pub struct MockEncryptor {
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockEncryptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }

    /// The payload this encryptor produces for `raw_key`.
    pub fn expected(raw_key: &str) -> String {
        format!("enc({})", raw_key.chars().rev().collect::<String>())
    }
}

#[async_trait]
impl KeyEncryptor for MockEncryptor {
    async fn encrypt(&self, raw_key: &str) -> Result<String, CryptoError> {
        *self.calls.lock() += 1;
        if let Some(message) = self.failure.lock().clone() {
            return Err(CryptoError(message));
        }
        Ok(Self::expected(raw_key))
    }
}
