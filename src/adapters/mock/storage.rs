//! In-memory storage backend for testing.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::traits::StorageBackend;

/// In-memory [`StorageBackend`] with failure injection and a write log.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    records: Arc<Mutex<HashMap<String, String>>>,
    write_log: Arc<Mutex<Vec<String>>>,
    read_should_fail: Arc<AtomicBool>,
    write_should_fail: Arc<AtomicBool>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw record directly, bypassing the write log.
    pub fn insert_raw(&self, key: &str, contents: &str) {
        self.records
            .lock()
            .insert(key.to_string(), contents.to_string());
    }

    /// Raw record stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.lock().get(key).cloned()
    }

    /// Keys of every write attempt, in order.
    pub fn write_log(&self) -> Vec<String> {
        self.write_log.lock().clone()
    }

    pub fn clear_write_log(&self) {
        self.write_log.lock().clear();
    }

    pub fn set_read_should_fail(&self, should_fail: bool) {
        self.read_should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn set_write_should_fail(&self, should_fail: bool) {
        self.write_should_fail.store(should_fail, Ordering::SeqCst);
    }
}

impl StorageBackend for InMemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        if self.read_should_fail.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "mock read failure"));
        }
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        self.write_log.lock().push(key.to_string());
        if self.write_should_fail.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "mock write failure"));
        }
        self.insert_raw(key, contents);
        Ok(())
    }
}
