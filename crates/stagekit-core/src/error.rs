//! Editor error types.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by editing, import and resource operations.
///
/// None of these are fatal: every failure leaves the scene in its previous
/// state.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Cannot place the shape over an existing one at ({x}, {y})")]
    PlacementConflict { x: f64, y: f64 },
    #[error("Unknown drop payload: {0}")]
    UnknownPayload(String),
    #[error("Duplicate shape id: {0}")]
    DuplicateId(String),
    #[error("Import failed: {0}")]
    Import(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to load image resource {id}: {reason}")]
    ResourceLoad { id: String, reason: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Editor is busy loading")]
    Busy,
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
