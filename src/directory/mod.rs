//! Provider/model directory.
//!
//! Lazily loaded list of backend providers, their models and the parameter
//! schema for each. State moves `Uninitialized → Loading → {Loaded, Failed}`
//! and back to `Loading` on reload. Every load gets a generation number; a
//! response is applied only if no newer load started after it, so a slow
//! reload never replaces a fresher one.

pub mod schema;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{SuperegoError, SuperegoResult};
use crate::logging::log_execution;
use crate::models::{ParameterDefinition, ProvidersModels};
use crate::signal::Signal;
use crate::traits::ProvidersSource;

pub use schema::{known_providers, static_parameters};

/// Provider name → parameter schema, keyed exactly like [`ProvidersModels`].
pub type ParameterDefinitions = IndexMap<String, Vec<ParameterDefinition>>;

/// Shown when a failed load produced an empty error message.
pub const LOAD_FAILED_FALLBACK: &str = "Failed to load model information.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectoryStatus {
    #[default]
    Uninitialized,
    Loading,
    Loaded,
    Failed,
}

/// One consistent view of the directory.
///
/// Replaced as a whole on every transition, so `providers_models` and
/// `parameter_definitions` always belong to the same load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectorySnapshot {
    pub status: DirectoryStatus,
    pub providers_models: ProvidersModels,
    pub parameter_definitions: ParameterDefinitions,
    pub error: Option<String>,
}

impl DirectorySnapshot {
    pub fn is_loading(&self) -> bool {
        self.status == DirectoryStatus::Loading
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers_models.keys().cloned().collect()
    }

    /// Models for `provider`; empty for unknown or absent providers.
    pub fn models_for(&self, provider: Option<&str>) -> Vec<String> {
        provider
            .and_then(|p| self.providers_models.get(p))
            .cloned()
            .unwrap_or_default()
    }

    /// Parameter schema for `provider`; empty for unknown or absent providers.
    pub fn params_for(&self, provider: Option<&str>) -> Vec<ParameterDefinition> {
        provider
            .and_then(|p| self.parameter_definitions.get(p))
            .cloned()
            .unwrap_or_default()
    }

    /// `Err(DirectoryLoad)` if the last load failed.
    pub fn check(&self) -> SuperegoResult<()> {
        match (&self.status, &self.error) {
            (DirectoryStatus::Failed, Some(message)) => Err(SuperegoError::DirectoryLoad {
                message: message.clone(),
            }),
            _ => Ok(()),
        }
    }

    fn loaded(providers_models: ProvidersModels) -> Self {
        let parameter_definitions = providers_models
            .keys()
            .map(|provider| {
                let params = static_parameters(provider).unwrap_or_else(|| {
                    warn!(provider = %provider, "Missing parameter definition for provider");
                    Vec::new()
                });
                (provider.clone(), params)
            })
            .collect();
        Self {
            status: DirectoryStatus::Loaded,
            providers_models,
            parameter_definitions,
            error: None,
        }
    }

    fn failed(err: &SuperegoError) -> Self {
        let message = err.to_string();
        let message = if message.is_empty() {
            LOAD_FAILED_FALLBACK.to_string()
        } else {
            message
        };
        Self {
            status: DirectoryStatus::Failed,
            providers_models: ProvidersModels::new(),
            parameter_definitions: ParameterDefinitions::new(),
            error: Some(message),
        }
    }
}

type SharedLoad = Shared<BoxFuture<'static, ()>>;

struct InFlightLoad {
    generation: u64,
    pending: SharedLoad,
}

/// Provider/model directory shared by every consumer of a client context.
#[derive(Clone)]
pub struct ModelDirectory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    source: Arc<dyn ProvidersSource>,
    state: Signal<DirectorySnapshot>,
    generation: AtomicU64,
    in_flight: Mutex<Option<InFlightLoad>>,
}

impl ModelDirectory {
    pub fn new(source: Arc<dyn ProvidersSource>) -> Self {
        Self {
            inner: Arc::new(DirectoryInner {
                source,
                state: Signal::default(),
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Fetch the directory, joining the outstanding load if there is one.
    pub async fn load(&self) -> DirectorySnapshot {
        let pending = {
            let mut in_flight = self.inner.in_flight.lock();
            let joined = in_flight.as_ref().map(|load| {
                debug!(generation = load.generation, "Joining in-flight directory load");
                load.pending.clone()
            });
            match joined {
                Some(pending) => pending,
                None => self.start(&mut in_flight),
            }
        };
        pending.await;
        self.snapshot()
    }

    /// Start a new load even if one is outstanding. The older load still
    /// completes but its result is discarded.
    pub async fn reload(&self) -> DirectorySnapshot {
        let pending = {
            let mut in_flight = self.inner.in_flight.lock();
            self.start(&mut in_flight)
        };
        pending.await;
        self.snapshot()
    }

    /// Load only if nothing has been loaded successfully yet.
    pub async fn ensure_loaded(&self) -> DirectorySnapshot {
        let snapshot = self.snapshot();
        if snapshot.status == DirectoryStatus::Loaded {
            return snapshot;
        }
        self.load().await
    }

    fn start(&self, slot: &mut Option<InFlightLoad>) -> SharedLoad {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.update(|snapshot| {
            snapshot.status = DirectoryStatus::Loading;
            snapshot.error = None;
        });

        let inner = Arc::clone(&self.inner);
        let pending = async move {
            let result =
                log_execution("Load model directory", inner.source.fetch_providers_models()).await;
            inner.finish(generation, result);
        }
        .boxed()
        .shared();

        *slot = Some(InFlightLoad {
            generation,
            pending: pending.clone(),
        });
        pending
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        self.inner.state.get()
    }

    pub fn status(&self) -> DirectoryStatus {
        self.inner.state.with(|s| s.status)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.with(DirectorySnapshot::is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.with(|s| s.error.clone())
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.inner.state.with(DirectorySnapshot::provider_names)
    }

    pub fn models_for(&self, provider: Option<&str>) -> Vec<String> {
        self.inner.state.with(|s| s.models_for(provider))
    }

    pub fn params_for(&self, provider: Option<&str>) -> Vec<ParameterDefinition> {
        self.inner.state.with(|s| s.params_for(provider))
    }

    pub fn subscribe(&self) -> watch::Receiver<DirectorySnapshot> {
        self.inner.state.subscribe()
    }
}

impl DirectoryInner {
    fn finish(&self, generation: u64, result: SuperegoResult<ProvidersModels>) {
        let mut in_flight = self.in_flight.lock();
        if in_flight.as_ref().map(|load| load.generation) == Some(generation) {
            *in_flight = None;
        }

        let current = self.generation.load(Ordering::SeqCst);
        if generation != current {
            debug!(generation, current, "Discarding stale directory response");
            return;
        }

        let next = match result {
            Ok(providers_models) => {
                info!(providers = providers_models.len(), "Providers and models loaded");
                DirectorySnapshot::loaded(providers_models)
            }
            Err(e) => DirectorySnapshot::failed(&e),
        };
        self.state.set(next);
    }
}

impl std::fmt::Debug for ModelDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelDirectory")
            .field("status", &self.status())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}
