//! Storage abstraction for exported scene documents.
//!
//! Backends move opaque byte blobs under a name. The canvas serializes and
//! parses the JSON itself.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for named blob storage backends.
///
/// On native platforms implementations must be Send + Sync.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save bytes under a name, replacing any previous content.
    fn save(&self, name: &str, bytes: &[u8]) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the bytes stored under a name.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>>;
}

/// Trait for named blob storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save bytes under a name, replacing any previous content.
    fn save(&self, name: &str, bytes: &[u8]) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the bytes stored under a name.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<Vec<u8>>>;
}
