//! src/error.rs
//! ============================================================================
//! # AppError: Unified Error Type for the QuickFolder Core
//!
//! This module defines the comprehensive error enum (`AppError`) used across
//! the entire crate. Each variant carries rich context for diagnostics, and
//! all major modules are expected to use `Result<T, AppError>` for
//! consistency. Enumeration deliberately does NOT surface per-entry failures
//! through this type (partial listings are valid results, see `fs::lister`).

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all core operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error retrieving file or directory metadata.
    #[error("Filesystem metadata error on {path:?}: {source}")]
    FsMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Requested file or directory does not exist.
    #[error("File or directory not found: {0:?}")]
    NotFound(PathBuf),

    /// Key-value settings store failure.
    #[error("Settings store error: {0}")]
    Store(String),

    /// Caching layer error.
    #[error("Cache error: {0}")]
    Cache(String),

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization or deserialization error (settings store JSON).
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Async task failure or join error.
    #[error("Async task failed: {0}")]
    Task(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Attach extra context to an error.
    pub fn with_context<S: Into<String>>(self, ctx: S) -> AppError {
        AppError::Other(format!("{}: {}", ctx.into(), self))
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Other(e.to_string())
    }
}
