//! API key submission.
//!
//! Encrypts a raw provider key and posts it to `{base}/key/set`. Failures of
//! the request are reported twice: written to the shared [`GlobalError`] for
//! passive display and returned to the caller. An encryption failure happens
//! before anything is sent and is only returned.

use std::sync::Arc;
use tracing::debug;

use crate::backend::BackendClient;
use crate::error::{ProtocolError, SuperegoError, SuperegoResult};
use crate::global_error::GlobalError;
use crate::logging::log_execution;
use crate::models::{KeySetRequest, KeySetResponse};
use crate::traits::{KeyEncryptor, SessionIdProvider};

/// Error text when the backend asks for a key without saying why.
pub const KEY_REQUIRED: &str = "API key is required";

/// Global error shown when a failure has no message of its own.
pub const UNKNOWN_SEND_ERROR: &str = "An unknown error occurred while sending API key";

/// Stateless credential submission. Each call is independent; concurrent
/// calls are not deduplicated.
#[derive(Clone)]
pub struct ApiKeySubmitter {
    backend: BackendClient,
    encryptor: Arc<dyn KeyEncryptor>,
    session_ids: Arc<dyn SessionIdProvider>,
    global_error: Arc<GlobalError>,
}

impl ApiKeySubmitter {
    pub fn new(
        backend: BackendClient,
        encryptor: Arc<dyn KeyEncryptor>,
        session_ids: Arc<dyn SessionIdProvider>,
        global_error: Arc<GlobalError>,
    ) -> Self {
        Self {
            backend,
            encryptor,
            session_ids,
            global_error,
        }
    }

    /// Submit `raw_key` for `provider`.
    ///
    /// A `needs_key` status fails the call even on HTTP 200. Any other
    /// non-2xx status fails with the status and the body's detail.
    pub async fn submit(&self, provider: &str, raw_key: &str) -> SuperegoResult<KeySetResponse> {
        self.global_error.clear();
        log_execution("Submit API key", self.send(provider, raw_key)).await
    }

    async fn send(&self, provider: &str, raw_key: &str) -> SuperegoResult<KeySetResponse> {
        let session_id = self.session_ids.get_or_create();

        let encrypted_key = self.encryptor.encrypt(raw_key).await?;
        debug!(provider, encrypted_len = encrypted_key.len(), "Encrypted API key");

        let request = KeySetRequest {
            provider: provider.to_string(),
            encrypted_key,
            session_id,
        };
        let response = self
            .backend
            .post_key_set(&request)
            .await
            .map_err(|e| self.report(e.into()))?;

        let body: KeySetResponse = match response.json() {
            Ok(body) => body,
            Err(e) => {
                let err = if response.is_success() {
                    ProtocolError::InvalidResponse {
                        message: e.to_string(),
                    }
                } else {
                    ProtocolError::HttpStatus {
                        status: response.status,
                        detail: None,
                    }
                };
                return Err(self.report(err.into()));
            }
        };

        if body.needs_key() {
            let err = ProtocolError::NeedsKey {
                message: body.message.unwrap_or_else(|| KEY_REQUIRED.to_string()),
            };
            return Err(self.report(err.into()));
        }

        if let Some(echoed) = body.session_id.as_deref() {
            debug!(session_id = echoed, "Backend echoed session id");
        }

        if !response.is_success() {
            let err = ProtocolError::HttpStatus {
                status: response.status,
                detail: body.error_detail().map(str::to_string),
            };
            return Err(self.report(err.into()));
        }

        Ok(body)
    }

    /// Publish `err` as the global error and hand it back.
    fn report(&self, err: SuperegoError) -> SuperegoError {
        let message = err.to_string();
        if message.is_empty() {
            self.global_error.set(UNKNOWN_SEND_ERROR);
        } else {
            self.global_error.set(message);
        }
        err
    }
}

impl std::fmt::Debug for ApiKeySubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeySubmitter")
            .field("backend", &self.backend)
            .finish()
    }
}
