// Storage backends for persisted blobs.
// A file backend with atomic writes, and an in-memory backend for ephemeral use.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::paths;

/// Durable key-value storage of opaque text blobs.
pub trait Storage {
    /// Read the blob stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn write(&self, key: &str, blob: &str) -> Result<()>;
}

/// Stores each blob as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = paths::blob_path(&self.dir, key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        Ok(Some(contents))
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = paths::blob_path(&self.dir, key);

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(blob.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}

/// Keeps blobs in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a blob, e.g. one left behind by a previous session.
    pub fn with_blob(key: &str, blob: &str) -> Self {
        let storage = Self::new();
        storage
            .blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write(key, blob)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write(key, blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested"));

        storage.write("tab-storage", "{\"a\":1}").unwrap();

        let read = storage.read("tab-storage").unwrap();
        assert_eq!(read, Some("{\"a\":1}".to_string()));
        assert!(!temp_dir.path().join("nested/tab-storage.tmp").exists());
    }

    #[test]
    fn test_file_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.write("key", "first").unwrap();
        storage.write("key", "second").unwrap();

        assert_eq!(storage.read("key").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_file_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        assert!(storage.read("missing").unwrap().is_none());
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::with_blob("seed", "x");
        assert_eq!(storage.read("seed").unwrap(), Some("x".to_string()));
        assert!(storage.read("other").unwrap().is_none());

        storage.write("other", "y").unwrap();
        assert_eq!(storage.read("other").unwrap(), Some("y".to_string()));
    }
}
