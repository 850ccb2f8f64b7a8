//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, bytes: &[u8]) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let bytes = bytes.to_vec();
        Box::pin(async move {
            let mut blobs = self.blobs.write().map_err(lock_error)?;
            blobs.insert(name, bytes);
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>> {
        let name = name.to_string();
        Box::pin(async move {
            let blobs = self.blobs.read().map_err(lock_error)?;
            blobs.get(&name).cloned().ok_or(StorageError::NotFound(name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        block_on(storage.save("scene", b"{}")).unwrap();
        assert_eq!(block_on(storage.load("scene")).unwrap(), b"{}");
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_save_replaces() {
        let storage = MemoryStorage::new();
        block_on(storage.save("scene", b"1")).unwrap();
        block_on(storage.save("scene", b"2")).unwrap();
        assert_eq!(block_on(storage.load("scene")).unwrap(), b"2");
    }
}
