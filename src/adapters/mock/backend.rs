//! Controllable fakes for [`ThreadFetcher`] and [`ProvidersSource`].
//!
//! Both answer immediately with a configured result, or, once `hold()` is
//! called, park every call until the test resolves it by call index. Parked
//! calls let tests control completion order.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::error::{NetworkError, SuperegoError, SuperegoResult};
use crate::models::{ProvidersModels, ThreadCacheData};
use crate::traits::{ProvidersSource, ThreadFetcher};

fn no_response(what: &str) -> SuperegoError {
    NetworkError::Other {
        message: format!("no mock response for {}", what),
    }
    .into()
}

#[derive(Debug)]
struct Parking<T> {
    hold: AtomicBool,
    calls: AtomicUsize,
    parked: Mutex<Vec<Option<oneshot::Sender<SuperegoResult<T>>>>>,
}

impl<T> Default for Parking<T> {
    fn default() -> Self {
        Self {
            hold: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            parked: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Parking<T> {
    /// Count the call; if holding, park it and wait for resolution.
    async fn enter(&self) -> Option<SuperegoResult<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.hold.load(Ordering::SeqCst) {
            return None;
        }
        let (tx, rx) = oneshot::channel();
        self.parked.lock().push(Some(tx));
        Some(
            rx.await
                .unwrap_or_else(|_| Err(no_response("dropped parked call"))),
        )
    }

    fn resolve(&self, call: usize, result: SuperegoResult<T>) -> bool {
        let sender = self.parked.lock().get_mut(call).and_then(Option::take);
        match sender {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }

    fn parked(&self) -> usize {
        self.parked.lock().len()
    }

    async fn wait_for_parked(&self, count: usize) {
        for _ in 0..10_000 {
            if self.parked() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {} parked calls, saw {}", count, self.parked());
    }
}

/// Fake [`ThreadFetcher`].
#[derive(Debug, Clone, Default)]
pub struct MockThreadFetcher {
    responses: Arc<Mutex<HashMap<String, SuperegoResult<ThreadCacheData>>>>,
    parking: Arc<Parking<ThreadCacheData>>,
}

impl MockThreadFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer immediately for `thread_id`.
    pub fn set_response(&self, thread_id: &str, result: SuperegoResult<ThreadCacheData>) {
        self.responses.lock().insert(thread_id.to_string(), result);
    }

    /// Park every following call until [`resolve`](Self::resolve)d.
    pub fn hold(&self) {
        self.parking.hold.store(true, Ordering::SeqCst);
    }

    /// Complete the `call`-th parked call (0-based).
    pub fn resolve(&self, call: usize, result: SuperegoResult<ThreadCacheData>) -> bool {
        self.parking.resolve(call, result)
    }

    /// Number of backend calls made.
    pub fn calls(&self) -> usize {
        self.parking.calls.load(Ordering::SeqCst)
    }

    pub async fn wait_for_parked(&self, count: usize) {
        self.parking.wait_for_parked(count).await
    }
}

#[async_trait]
impl ThreadFetcher for MockThreadFetcher {
    async fn fetch_thread(&self, thread_id: &str) -> SuperegoResult<ThreadCacheData> {
        if let Some(result) = self.parking.enter().await {
            return result;
        }
        self.responses
            .lock()
            .get(thread_id)
            .cloned()
            .unwrap_or_else(|| Err(no_response(thread_id)))
    }
}

/// Fake [`ProvidersSource`].
#[derive(Debug, Clone, Default)]
pub struct MockProvidersSource {
    response: Arc<Mutex<Option<SuperegoResult<ProvidersModels>>>>,
    parking: Arc<Parking<ProvidersModels>>,
}

impl MockProvidersSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_providers(providers: ProvidersModels) -> Self {
        let source = Self::new();
        source.set_response(Ok(providers));
        source
    }

    /// Answer every following unparked call with `result`.
    pub fn set_response(&self, result: SuperegoResult<ProvidersModels>) {
        *self.response.lock() = Some(result);
    }

    /// Park every following call until [`resolve`](Self::resolve)d.
    pub fn hold(&self) {
        self.parking.hold.store(true, Ordering::SeqCst);
    }

    /// Complete the `call`-th parked call (0-based).
    pub fn resolve(&self, call: usize, result: SuperegoResult<ProvidersModels>) -> bool {
        self.parking.resolve(call, result)
    }

    pub fn calls(&self) -> usize {
        self.parking.calls.load(Ordering::SeqCst)
    }

    pub async fn wait_for_parked(&self, count: usize) {
        self.parking.wait_for_parked(count).await
    }
}

#[async_trait]
impl ProvidersSource for MockProvidersSource {
    async fn fetch_providers_models(&self) -> SuperegoResult<ProvidersModels> {
        if let Some(result) = self.parking.enter().await {
            return result;
        }
        self.response
            .lock()
            .clone()
            .unwrap_or_else(|| Err(no_response("providers")))
    }
}
