//! Durable key-value store.
//!
//! Values are serialized as JSON and written through a [`StorageBackend`].
//! Every handle cloned from one [`DurableStore`] shares an in-process cache,
//! so a read always observes the latest `set` made through any of them.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::signal::Signal;
use crate::traits::StorageBackend;

/// Typed access to a local durable medium.
#[derive(Clone)]
pub struct DurableStore {
    inner: Arc<DurableStoreInner>,
}

struct DurableStoreInner {
    backend: Arc<dyn StorageBackend>,
    /// Last value read or written per key
    cache: Mutex<HashMap<String, serde_json::Value>>,
    /// Serializes read-modify-write cycles across all handles
    rmw: Mutex<()>,
}

impl DurableStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            inner: Arc::new(DurableStoreInner {
                backend,
                cache: Mutex::new(HashMap::new()),
                rmw: Mutex::new(()),
            }),
        }
    }

    /// Read the value stored under `key`.
    ///
    /// Returns `None` when the record is missing, unreadable or does not
    /// deserialize as `T`. Corruption is logged, never returned.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.raw_value(key)?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!(key, error = %e, "Durable record has unexpected shape, using default");
                None
            }
        }
    }

    /// Read the value stored under `key`, or `default`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Serialize `value` and write it under `key`.
    ///
    /// The in-process cache is updated before the backend write, and writes
    /// reach the backend in call order.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value).map_err(|e| StorageError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let text = value.to_string();

        let mut cache = self.inner.cache.lock();
        cache.insert(key.to_string(), value);
        self.inner
            .backend
            .write(key, &text)
            .map_err(|e| StorageError::Io {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Read `key` (or `default`), let `f` mutate it, and write it back if
    /// `f` returns true. No other read-modify-write can interleave.
    pub fn update_if<T, F>(&self, key: &str, default: T, f: F) -> Result<(T, bool), StorageError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> bool,
    {
        let _guard = self.inner.rmw.lock();
        let mut value = self.get_or(key, default);
        let changed = f(&mut value);
        if changed {
            self.set(key, &value)?;
        }
        Ok((value, changed))
    }

    fn raw_value(&self, key: &str) -> Option<serde_json::Value> {
        let mut cache = self.inner.cache.lock();
        if let Some(value) = cache.get(key) {
            return Some(value.clone());
        }

        let text = match self.inner.backend.read(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(key, "No durable record, using default");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read durable record, using default");
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => {
                cache.insert(key.to_string(), value.clone());
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "Corrupt durable record, using default");
                None
            }
        }
    }
}

impl std::fmt::Debug for DurableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self.inner.cache.lock().keys().cloned().collect();
        f.debug_struct("DurableStore")
            .field("cached_keys", &keys)
            .finish()
    }
}

/// A single named value in a [`DurableStore`], with change notification.
///
/// Rehydrated on construction, written back on every mutation.
pub struct Persisted<T> {
    store: DurableStore,
    key: String,
    default: T,
    signal: Signal<T>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(store: DurableStore, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let initial = store.get_or(&key, default.clone());
        Self {
            store,
            key,
            default,
            signal: Signal::new(initial),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value, as last written through the shared store.
    pub fn get(&self) -> T {
        self.store.get_or(&self.key, self.default.clone())
    }

    /// Replace the value.
    pub fn set(&self, value: T) -> Result<(), StorageError> {
        self.update_if(|current| {
            *current = value;
            true
        })
        .map(|_| ())
    }

    /// Read-modify-write. Persists and notifies only when `f` returns true.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> Result<bool, StorageError> {
        let (value, changed) = self.store.update_if(&self.key, self.default.clone(), f)?;
        if changed {
            self.signal.set(value);
        }
        Ok(changed)
    }

    /// Subscribe to values written through this handle.
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<T> {
        self.signal.subscribe()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Persisted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persisted").field("key", &self.key).finish()
    }
}
