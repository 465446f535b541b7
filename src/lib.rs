//! Superego client state - session and thread state cache for the superego
//! orchestration client.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod backend;
pub mod config;
pub mod context;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod global_error;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod signal;
pub mod store;
pub mod thread_cache;
pub mod traits;
