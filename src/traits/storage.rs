//! Durable storage backend trait abstraction.
//!
//! A backend persists opaque serialized records by name. The
//! [`DurableStore`](crate::store::DurableStore) layers typing, caching and
//! default fallback on top.

use std::io;

/// Trait for the local durable medium.
///
/// Implementations include the file-based
/// [`FileStorageBackend`](crate::adapters::FileStorageBackend) and the
/// in-memory [`InMemoryStorage`](crate::adapters::mock::InMemoryStorage).
pub trait StorageBackend: Send + Sync {
    /// Read the raw record stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been written under `key`.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Replace the record stored under `key`.
    fn write(&self, key: &str, contents: &str) -> io::Result<()>;
}
