//! # Blueprint Storage
//!
//! Saved-project persistence for Blueprint: a JSON file repository that
//! keeps completed pipeline runs under `~/.blueprint/projects.json`.

pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{StorageError, StorageResult};
pub use repository::{
    ensure_projects_file, read_projects_file, write_projects_file, ProjectRepository,
};

// Re-export the on-disk types from core
pub use blueprint_core::{SavedProject, SavedProjectsFile};
