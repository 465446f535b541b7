//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport to the backend (GET, POST)
//! - [`StorageBackend`] - Local durable medium for persisted values
//! - [`KeyEncryptor`] - Raw credential → transmittable payload
//! - [`SessionIdProvider`] - Client session identifier
//! - [`ThreadFetcher`] / [`ProvidersSource`] - Backend reads used by the caches

pub mod backend;
pub mod crypto;
pub mod http;
pub mod session;
pub mod storage;

pub use backend::{ProvidersSource, ThreadFetcher};
pub use crypto::KeyEncryptor;
pub use http::{json_headers, Headers, HttpClient, HttpError, Response};
pub use session::SessionIdProvider;
pub use storage::StorageBackend;
