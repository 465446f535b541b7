//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let ctx = TestContextBuilder::new(&server.uri()).build();
//! ```

pub mod mocks;

pub use mocks::*;

use std::path::Path;
use std::sync::Arc;

use superego::adapters::{FileStorageBackend, ReqwestHttpClient};
use superego::config::ClientConfig;
use superego::context::ClientContext;
use superego::traits::StorageBackend;

/// Client config pointing at a wiremock server.
pub fn config_for(server_uri: &str) -> ClientConfig {
    ClientConfig::new().with_base_url(format!("{}/api", server_uri))
}

/// Builder for [`ClientContext`]s over the real reqwest transport.
pub struct TestContextBuilder {
    config: ClientConfig,
    storage: Arc<dyn StorageBackend>,
    encryptor: MockEncryptor,
    session_id: String,
}

impl TestContextBuilder {
    /// Context talking to `server_uri`, with in-memory storage.
    pub fn new(server_uri: &str) -> Self {
        Self {
            config: config_for(server_uri),
            storage: Arc::new(InMemoryStorage::new()),
            encryptor: MockEncryptor::new(),
            session_id: TEST_SESSION_ID.to_string(),
        }
    }

    /// Store durable state as files under `dir`.
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.config = self.config.with_data_dir(dir);
        self.storage = Arc::new(FileStorageBackend::new(dir));
        self
    }

    #[allow(dead_code)]
    pub fn with_storage(mut self, storage: InMemoryStorage) -> Self {
        self.storage = Arc::new(storage);
        self
    }

    #[allow(dead_code)]
    pub fn with_encryptor(mut self, encryptor: MockEncryptor) -> Self {
        self.encryptor = encryptor;
        self
    }

    pub fn build(self) -> ClientContext {
        ClientContext::new(
            self.config,
            Arc::new(ReqwestHttpClient::new()),
            self.storage,
            Arc::new(self.encryptor),
            Arc::new(FixedSessionId::new(&self.session_id)),
        )
    }
}
