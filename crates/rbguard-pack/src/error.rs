//! Pack-specific error types.
//!
//! All errors carry the manifest or directory path involved so that a CI
//! failure can be traced to the offending file without rerunning locally.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading the runbook tree.
#[derive(Debug, Error)]
pub enum PackError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A required file was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The runbooks root directory does not exist.
    #[error("runbooks root not found: {path}")]
    RootNotFound { path: PathBuf },

    /// The configured runbooks root cannot name a repository directory.
    #[error("invalid runbooks root {root:?}: {reason}")]
    InvalidRoot { root: String, reason: String },

    /// A manifest has no `ref` key.
    #[error("pack manifest {path} has no `ref` key")]
    MissingRef { path: PathBuf },

    /// A manifest `ref` is present but unusable.
    #[error("pack manifest {path} has an invalid `ref`: {detail}")]
    InvalidRef { path: PathBuf, detail: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pack operations.
pub type PackResult<T> = Result<T, PackError>;
