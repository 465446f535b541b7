//! Client context: one explicitly constructed owner for every component.
//!
//! Consumers receive a `ClientContext` (or clones of the components they
//! need) instead of reaching for process-wide singletons.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::adapters::{FileStorageBackend, PersistedSessionId, ReqwestHttpClient};
use crate::backend::BackendClient;
use crate::config::ClientConfig;
use crate::credentials::ApiKeySubmitter;
use crate::directory::ModelDirectory;
use crate::error::SuperegoResult;
use crate::global_error::GlobalError;
use crate::models::{SessionId, ThreadCacheData, ThreadId, UiSessionState};
use crate::store::{ActivePointer, DurableStore, KnownThreadIndex, SessionMap};
use crate::thread_cache::ThreadCache;
use crate::traits::{HttpClient, KeyEncryptor, SessionIdProvider, StorageBackend};

/// All client-side session and thread state.
pub struct ClientContext {
    config: ClientConfig,
    store: DurableStore,
    known_threads: KnownThreadIndex,
    sessions: SessionMap,
    active_session: ActivePointer,
    active_config_editor: ActivePointer,
    thread_cache: ThreadCache,
    directory: ModelDirectory,
    global_error: Arc<GlobalError>,
    submitter: ApiKeySubmitter,
    backend: BackendClient,
}

impl ClientContext {
    /// Build a context over injected transport, storage and capabilities.
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        storage: Arc<dyn StorageBackend>,
        encryptor: Arc<dyn KeyEncryptor>,
        session_ids: Arc<dyn SessionIdProvider>,
    ) -> Self {
        let store = DurableStore::new(storage);
        let known_threads = KnownThreadIndex::new(store.clone());
        let sessions = SessionMap::new(store.clone(), known_threads.clone());
        let backend = BackendClient::new(config.clone(), http);
        let thread_cache = ThreadCache::new(Arc::new(backend.clone()), known_threads.clone());
        let directory = ModelDirectory::new(Arc::new(backend.clone()));
        let global_error = Arc::new(GlobalError::new());
        let submitter = ApiKeySubmitter::new(
            backend.clone(),
            encryptor,
            session_ids,
            Arc::clone(&global_error),
        );

        debug!(
            base_url = %config.base_url,
            known_threads = known_threads.len(),
            "Client context ready"
        );

        Self {
            config,
            store,
            known_threads,
            sessions,
            active_session: ActivePointer::new(),
            active_config_editor: ActivePointer::new(),
            thread_cache,
            directory,
            global_error,
            submitter,
            backend,
        }
    }

    /// Production wiring: reqwest transport, files under `config.data_dir`,
    /// and a durable client session id.
    pub fn from_config(config: ClientConfig, encryptor: Arc<dyn KeyEncryptor>) -> Self {
        let storage: Arc<dyn StorageBackend> = Arc::new(FileStorageBackend::new(config.data_dir.clone()));
        let session_ids = Arc::new(PersistedSessionId::new(DurableStore::new(Arc::clone(&storage))));
        Self::new(
            config,
            Arc::new(ReqwestHttpClient::new()),
            storage,
            encryptor,
            session_ids,
        )
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &DurableStore {
        &self.store
    }

    pub fn known_threads(&self) -> &KnownThreadIndex {
        &self.known_threads
    }

    pub fn sessions(&self) -> &SessionMap {
        &self.sessions
    }

    pub fn active_session(&self) -> &ActivePointer {
        &self.active_session
    }

    /// ThreadId whose configuration card is being edited.
    pub fn active_config_editor(&self) -> &ActivePointer {
        &self.active_config_editor
    }

    pub fn thread_cache(&self) -> &ThreadCache {
        &self.thread_cache
    }

    pub fn directory(&self) -> &ModelDirectory {
        &self.directory
    }

    pub fn global_error(&self) -> &GlobalError {
        &self.global_error
    }

    pub fn submitter(&self) -> &ApiKeySubmitter {
        &self.submitter
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    /// Create a session named `name` and make it active.
    pub fn open_session(&self, name: &str) -> SuperegoResult<SessionId> {
        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .create_session(&session_id, UiSessionState::new(name))?;
        self.active_session.set_active(Some(&session_id));
        info!(session_id = %session_id, name, "Opened session");
        Ok(session_id)
    }

    /// Remove a session, clearing the active pointer if it pointed there.
    pub fn close_session(&self, session_id: &str) -> SuperegoResult<Option<UiSessionState>> {
        let removed = self.sessions.remove(session_id)?;
        if self.active_session.clear_if(session_id) {
            debug!(session_id, "Closed the active session");
        }
        Ok(removed)
    }

    /// Thread targeted by the active session, if any.
    pub fn active_thread(&self) -> Option<ThreadId> {
        let session_id = self.active_session.get_active()?;
        self.sessions.get(&session_id)?.thread_id
    }

    /// Refresh the active session's thread in the thread cache.
    ///
    /// `Ok(None)` when no session is active or it has no thread.
    pub async fn refresh_active_thread(&self) -> SuperegoResult<Option<ThreadCacheData>> {
        match self.active_thread() {
            Some(thread_id) => self.thread_cache.refresh(&thread_id).await.map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("config", &self.config)
            .field("active_session", &self.active_session.get_active())
            .field("thread_cache", &self.thread_cache)
            .field("directory", &self.directory)
            .finish()
    }
}
