//! Data model shared by the stores, the cache and the backend client.

mod key;
mod provider;
mod session;
mod thread;

pub use key::{KeySetRequest, KeySetResponse};
pub use provider::{ParamType, ParameterDefinition, ProvidersModels};
pub use session::UiSessionState;
pub use thread::{ThreadCacheData, ThreadStatus};

/// Backend-assigned identifier of a persistent conversation.
pub type ThreadId = String;

/// Client-assigned identifier of one UI view/tab.
pub type SessionId = String;
