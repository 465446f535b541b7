//! Prelude module for convenient imports.
//!
//! ```ignore
//! use superego::prelude::*;
//! ```
//!
//! This will import:
//! - The client context and its configuration
//! - Components (session map, known threads, thread cache, directory)
//! - Model types (UiSessionState, ThreadCacheData, ThreadStatus)
//! - Error types (SuperegoError, SuperegoResult)

// Context and configuration
pub use crate::config::ClientConfig;
pub use crate::context::ClientContext;

// Components
pub use crate::credentials::ApiKeySubmitter;
pub use crate::directory::{DirectorySnapshot, DirectoryStatus, ModelDirectory};
pub use crate::global_error::GlobalError;
pub use crate::store::{ActivePointer, DurableStore, KnownThreadIndex, SessionMap};
pub use crate::thread_cache::ThreadCache;

// Model types
pub use crate::models::{
    KeySetResponse, ParameterDefinition, ProvidersModels, SessionId, ThreadCacheData, ThreadId,
    ThreadStatus, UiSessionState,
};

// Errors
pub use crate::error::{SuperegoError, SuperegoResult};
