//! File-based storage implementation for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::fs;
use std::path::PathBuf;

/// Stores each blob as a `.json` file in a base directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// File path for a blob name, sanitized to be safe as a file name.
    fn blob_path(&self, name: &str) -> PathBuf {
        let safe_name: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_name))
    }
}

impl Storage for FileStorage {
    fn save(&self, name: &str, bytes: &[u8]) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.blob_path(name);
        let bytes = bytes.to_vec();
        Box::pin(async move {
            fs::write(&path, bytes).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        let path = self.blob_path(name);
        let name = name.to_string();
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(name));
            }
            fs::read(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        block_on(storage.save("layout", br#"{"shapes":[]}"#)).unwrap();
        let loaded = block_on(storage.load("layout")).unwrap();
        assert_eq!(loaded, br#"{"shapes":[]}"#);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_creates_dir_and_replaces() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested")).unwrap();

        block_on(storage.save("doc", b"1")).unwrap();
        block_on(storage.save("doc", b"2")).unwrap();
        assert!(dir.path().join("nested").join("doc.json").exists());
        assert_eq!(block_on(storage.load("doc")).unwrap(), b"2");
    }

    #[test]
    fn test_file_storage_sanitizes_name() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        block_on(storage.save("../escape:me*", b"x")).unwrap();
        assert!(dir.path().join("___escape_me_.json").exists());
        assert_eq!(block_on(storage.load("../escape:me*")).unwrap(), b"x");
    }
}
