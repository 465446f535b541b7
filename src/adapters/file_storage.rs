//! File-based durable storage adapter.
//!
//! Each key is stored as `<data_dir>/<key>.json`. Writes go to a temporary
//! sibling file that is then renamed over the target, so a crash never
//! leaves a half-written record.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::traits::StorageBackend;

/// File-based storage backend.
#[derive(Debug, Clone)]
pub struct FileStorageBackend {
    dir: PathBuf,
}

impl FileStorageBackend {
    /// Store records under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> io::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage key: {:?}", key),
            ));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StorageBackend for FileStorageBackend {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)
    }
}
