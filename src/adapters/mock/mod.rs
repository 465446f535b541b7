//! Mock implementations for testing.
//!
//! Test doubles for every trait seam, usable without network or disk:
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryStorage`] - Storage backend with failure injection
//! - [`MockEncryptor`] / [`FixedSessionId`] - Credential flow collaborators
//! - [`MockThreadFetcher`] / [`MockProvidersSource`] - Parkable backend fetches

pub mod backend;
pub mod crypto;
pub mod http;
pub mod session;
pub mod storage;

pub use backend::{MockProvidersSource, MockThreadFetcher};
pub use crypto::MockEncryptor;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use session::FixedSessionId;
pub use storage::InMemoryStorage;
