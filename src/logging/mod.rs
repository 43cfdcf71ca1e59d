// src/logging/mod.rs
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::core::config::Config;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Logger already initialised: {0}")]
    AlreadyInitialised(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, LoggingError>;

/// Size at which an existing log file is rotated away on startup.
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Installs the global logger. Logs go to stderr unless a log file is
/// configured, in which case they are appended to that file.
pub fn init(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false);

    if let Some(path) = &config.log_file {
        rotate_if_needed(path)?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

// Moves an oversized log aside and returns the new path
fn rotate_if_needed(path: &Path) -> Result<Option<PathBuf>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if metadata.len() <= MAX_LOG_SIZE {
        return Ok(None);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "toolbox".to_string());
    let rotated = path.with_file_name(format!(
        "{}-{}.log",
        stem,
        Utc::now().format("%Y%m%d%H%M%S")
    ));
    fs::rename(path, &rotated)?;
    Ok(Some(rotated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn small_logs_are_left_alone() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("toolbox.log");
        assert_eq!(rotate_if_needed(&path).unwrap(), None);

        fs::write(&path, "line\n").unwrap();
        assert_eq!(rotate_if_needed(&path).unwrap(), None);
        assert!(path.exists());
    }

    #[test]
    fn oversized_logs_are_rotated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("toolbox.log");
        fs::write(&path, vec![b'x'; (MAX_LOG_SIZE + 1) as usize]).unwrap();

        let rotated = rotate_if_needed(&path).unwrap().unwrap();
        assert!(!path.exists());
        assert!(rotated.exists());
        assert!(rotated
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("toolbox-"));
    }
}
