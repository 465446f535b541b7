//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileStorageBackend`] - One JSON file per durable key
//! - [`PersistedSessionId`] - Client session id kept in the durable store
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every trait.

pub mod file_storage;
pub mod mock;
pub mod reqwest_http;
pub mod session_id;

pub use file_storage::FileStorageBackend;
pub use mock::{InMemoryStorage, MockEncryptor, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
pub use session_id::{PersistedSessionId, SESSION_ID_KEY};
