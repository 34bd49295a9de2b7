// ABOUTME: Error types for saved-project persistence
// ABOUTME: Covers filesystem access, JSON serialization, and missing-record lookups

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Project not found: {0}")]
    NotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
