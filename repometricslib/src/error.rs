//! Error types for repometricslib

use std::path::PathBuf;
use thiserror::Error;

use crate::data::SkipReason;

/// Errors that can occur while measuring a repository
#[derive(Error, Debug)]
pub enum RepoMetricsError {
    /// An external tool could not be run or exited with failure.
    ///
    /// The message is the tool's own diagnostic output.
    #[error("{message}")]
    ToolInvocation { command: String, message: String },

    /// A prerequisite of the requested mode is missing
    #[error("{0}")]
    Configuration(String),

    /// File exceeds the configured byte ceiling
    #[error("file too large ({size} bytes > {limit}): {path}")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// File could not be opened, stat'ed or read
    #[error("failed to read file '{path}': {source}")]
    UnreadableFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RepoMetricsError {
    /// The skip reason for per-file errors, `None` for errors that abort a run.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            RepoMetricsError::FileTooLarge { .. } => Some(SkipReason::TooLarge),
            RepoMetricsError::UnreadableFile { .. } => Some(SkipReason::Unreadable),
            _ => None,
        }
    }

    /// Whether this error stems from configuration rather than execution.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RepoMetricsError::Configuration(_))
    }
}
