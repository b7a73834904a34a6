//! JSON-file key-value store backing favorites and search history.
//!
//! Each key maps to `<dir>/<key>.json`. Reads and writes are synchronous and
//! local; a single process owns the directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppError;

/// Key-value store over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a value, falling back to `T::default()` when the key is missing
    /// or its file cannot be parsed.
    pub fn read<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::error!(key, path = %path.display(), error = %e, "Failed to read store");
                return T::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::error!(key, path = %path.display(), error = %e, "Corrupt store, using empty value");
            T::default()
        })
    }

    /// Write a value as pretty JSON, creating the directory if needed.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.path(key), content)?;
        tracing::debug!(key, "Store written");
        Ok(())
    }

    /// Delete a key. Missing keys are not an error.
    pub fn remove(&self, key: &str) -> Result<(), AppError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
