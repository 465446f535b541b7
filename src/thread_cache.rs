//! Thread cache: latest known snapshot per thread, never persisted.
//!
//! Refreshes are single-flight per ThreadId. While a refresh is outstanding,
//! further requests for the same thread await the same backend call and
//! receive the same result. Every local write bumps a per-thread version; a
//! refresh only applies its response if the version has not moved since the
//! refresh began, so a slow response never replaces newer data.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{StorageError, SuperegoResult};
use crate::models::{ThreadCacheData, ThreadId};
use crate::signal::Signal;
use crate::store::KnownThreadIndex;
use crate::traits::ThreadFetcher;

/// Cached snapshots keyed by ThreadId.
pub type ThreadEntries = HashMap<ThreadId, ThreadCacheData>;

type SharedRefresh = Shared<BoxFuture<'static, SuperegoResult<ThreadCacheData>>>;

/// In-memory cache of thread snapshots with single-flight refresh.
#[derive(Clone)]
pub struct ThreadCache {
    inner: Arc<ThreadCacheInner>,
}

struct ThreadCacheInner {
    fetcher: Arc<dyn ThreadFetcher>,
    known_threads: KnownThreadIndex,
    entries: Signal<ThreadEntries>,
    state: Mutex<RefreshState>,
}

#[derive(Default)]
struct RefreshState {
    /// Bumped on every write or invalidation of a thread
    versions: HashMap<ThreadId, u64>,
    /// Outstanding refresh per thread
    in_flight: HashMap<ThreadId, InFlightRefresh>,
}

struct InFlightRefresh {
    pending: SharedRefresh,
    /// Callers currently awaiting `pending`
    waiters: usize,
}

impl RefreshState {
    fn version(&self, thread_id: &str) -> u64 {
        self.versions.get(thread_id).copied().unwrap_or(0)
    }

    fn bump(&mut self, thread_id: &str) {
        *self.versions.entry(thread_id.to_string()).or_default() += 1;
    }
}

impl ThreadCache {
    pub fn new(fetcher: Arc<dyn ThreadFetcher>, known_threads: KnownThreadIndex) -> Self {
        Self {
            inner: Arc::new(ThreadCacheInner {
                fetcher,
                known_threads,
                entries: Signal::default(),
                state: Mutex::new(RefreshState::default()),
            }),
        }
    }

    pub fn get(&self, thread_id: &str) -> Option<ThreadCacheData> {
        self.inner
            .entries
            .with(|entries| entries.get(thread_id).cloned())
    }

    /// Store `data` for `thread_id`, registering the thread first.
    ///
    /// An outstanding refresh for the thread will not overwrite it.
    pub fn put(&self, thread_id: &str, data: ThreadCacheData) -> Result<(), StorageError> {
        self.inner.known_threads.add(thread_id)?;

        let mut state = self.inner.state.lock();
        state.bump(thread_id);
        self.inner.entries.update(|entries| {
            entries.insert(thread_id.to_string(), data);
        });
        Ok(())
    }

    /// Drop the snapshot for `thread_id`. Returns true if one was cached.
    ///
    /// An outstanding refresh still resolves for its callers but is not
    /// written back.
    pub fn invalidate(&self, thread_id: &str) -> bool {
        let mut state = self.inner.state.lock();
        state.bump(thread_id);
        self.inner
            .entries
            .update_if(|entries| entries.remove(thread_id).is_some())
    }

    /// Drop every snapshot.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        let ids: Vec<ThreadId> = self.inner.entries.with(|entries| entries.keys().cloned().collect());
        for id in &ids {
            state.bump(id);
        }
        self.inner.entries.update_if(|entries| {
            let had_entries = !entries.is_empty();
            entries.clear();
            had_entries
        });
    }

    /// Fetch the latest snapshot from the backend and cache it.
    ///
    /// Joins the outstanding refresh for `thread_id` if there is one.
    pub async fn refresh(&self, thread_id: &str) -> SuperegoResult<ThreadCacheData> {
        let refresh = {
            let mut state = self.inner.state.lock();
            let joined = state.in_flight.get_mut(thread_id).map(|entry| {
                entry.waiters += 1;
                entry.pending.clone()
            });
            match joined {
                Some(existing) => {
                    debug!(thread_id, "Joining in-flight thread refresh");
                    existing
                }
                None => {
                    let started_at = state.version(thread_id);
                    let inner = Arc::clone(&self.inner);
                    let id = thread_id.to_string();
                    let refresh = async move {
                        let result = inner.fetcher.fetch_thread(&id).await;
                        inner.complete(&id, started_at, result)
                    }
                    .boxed()
                    .shared();
                    state.in_flight.insert(
                        thread_id.to_string(),
                        InFlightRefresh {
                            pending: refresh.clone(),
                            waiters: 1,
                        },
                    );
                    refresh
                }
            }
        };
        let _waiter = Waiter {
            inner: self.inner.as_ref(),
            thread_id,
            pending: refresh.clone(),
        };
        refresh.await
    }

    /// Cached snapshot, or a refresh if there is none.
    pub async fn get_or_refresh(&self, thread_id: &str) -> SuperegoResult<ThreadCacheData> {
        match self.get(thread_id) {
            Some(data) => Ok(data),
            None => self.refresh(thread_id).await,
        }
    }

    /// True while a refresh for `thread_id` is outstanding and someone is
    /// still awaiting it.
    pub fn is_refreshing(&self, thread_id: &str) -> bool {
        self.inner.state.lock().in_flight.contains_key(thread_id)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.with(HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> watch::Receiver<ThreadEntries> {
        self.inner.entries.subscribe()
    }
}

impl ThreadCacheInner {
    fn complete(
        &self,
        thread_id: &str,
        started_at: u64,
        result: SuperegoResult<ThreadCacheData>,
    ) -> SuperegoResult<ThreadCacheData> {
        let registered = match &result {
            Ok(_) => self.known_threads.add(thread_id).map(|_| ()),
            Err(_) => Ok(()),
        };

        let mut state = self.state.lock();
        state.in_flight.remove(thread_id);

        let data = match (result, registered) {
            (Err(e), _) => {
                warn!(thread_id, error = %e, "Thread refresh failed");
                return Err(e);
            }
            (Ok(_), Err(e)) => {
                warn!(thread_id, error = %e, "Could not register refreshed thread");
                return Err(e.into());
            }
            (Ok(data), Ok(())) => data,
        };

        if state.version(thread_id) != started_at {
            debug!(thread_id, "Discarding refresh superseded by a newer write");
            let current = self.entries.with(|entries| entries.get(thread_id).cloned());
            return Ok(current.unwrap_or(data));
        }

        state.bump(thread_id);
        self.entries.update(|entries| {
            entries.insert(thread_id.to_string(), data.clone());
        });
        Ok(data)
    }
}

/// Held by each caller awaiting a refresh. When the last caller goes away
/// before the refresh completes, the entry is dropped so the next `refresh`
/// starts a new fetch.
struct Waiter<'a> {
    inner: &'a ThreadCacheInner,
    thread_id: &'a str,
    pending: SharedRefresh,
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        let abandoned = match state.in_flight.get_mut(self.thread_id) {
            // Completed refreshes have already left the table, and a newer
            // refresh for the same thread is not ours to touch.
            Some(entry) if entry.pending.ptr_eq(&self.pending) => {
                entry.waiters -= 1;
                entry.waiters == 0
            }
            _ => false,
        };
        if abandoned {
            state.in_flight.remove(self.thread_id);
            debug!(thread_id = self.thread_id, "Thread refresh abandoned by every caller");
        }
    }
}

impl std::fmt::Debug for ThreadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadCache")
            .field("cached", &self.len())
            .finish()
    }
}
