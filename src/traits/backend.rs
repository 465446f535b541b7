//! Backend fetch capabilities consumed by the caches.
//!
//! [`BackendClient`](crate::backend::BackendClient) implements both; tests
//! substitute counting or gated fakes.

use async_trait::async_trait;

use crate::error::SuperegoResult;
use crate::models::{ProvidersModels, ThreadCacheData};

/// Fetches the latest snapshot of one thread.
#[async_trait]
pub trait ThreadFetcher: Send + Sync {
    async fn fetch_thread(&self, thread_id: &str) -> SuperegoResult<ThreadCacheData>;
}

/// Fetches the provider → models directory.
#[async_trait]
pub trait ProvidersSource: Send + Sync {
    async fn fetch_providers_models(&self) -> SuperegoResult<ProvidersModels>;
}
