use std::env;
use std::fs::{File, OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use dirs_next::{cache_dir, home_dir};
use thiserror::Error;

/// Environment variable allowing callers to override the log file path.
pub const LOG_PATH_ENV: &str = "KEYENTRY_LOG_PATH";

/// Default filename for the diagnostic log.
pub const LOG_FILE_NAME: &str = "keyentry.log";

/// Error surfaced when the diagnostic log file cannot be opened.
#[derive(Debug, Error)]
pub enum LogFileError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir { path: PathBuf, source: std::io::Error },
    #[error("failed to open log file {path}: {source}")]
    Open { path: PathBuf, source: std::io::Error },
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolve where diagnostics are written.
///
/// `KEYENTRY_LOG_PATH` wins when set to a non-blank value; otherwise the log
/// lives under the platform cache directory (`~/.cache/keyentry/keyentry.log`
/// on Linux).
pub fn default_log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyentry")
        .join(LOG_FILE_NAME)
}

/// Open `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> Result<File, LogFileError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).map_err(|source| LogFileError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogFileError::Open {
            path: path.to_path_buf(),
            source,
        })
}
