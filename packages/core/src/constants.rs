// ABOUTME: Filesystem locations and version markers shared across Blueprint packages
// ABOUTME: Resolves the ~/.blueprint directory and the saved-projects file path

use std::env;
use std::path::PathBuf;

/// Current version of the saved-projects file format
pub const PROJECTS_VERSION: &str = "1.0.0";

/// Maximum number of saved pipeline runs kept on disk
pub const MAX_SAVED_PROJECTS: usize = 20;

/// Get the path to the Blueprint directory (~/.blueprint)
pub fn blueprint_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".blueprint")
    } else {
        // Fall back to dirs crate for normal usage
        dirs::home_dir()
            .expect("Unable to get home directory")
            .join(".blueprint")
    }
}

/// Get the path to the projects.json file (~/.blueprint/projects.json)
pub fn projects_file() -> PathBuf {
    blueprint_dir().join("projects.json")
}
