// src/utils/io.rs
use std::path::PathBuf;

/// Per-user data directory for persisted tool state.
pub fn get_app_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "rusttoolbox", "rust_toolbox")
        .map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
}
