//! Git invocation errors.
//!
//! Every variant carries the git arguments that were run so a failing CI
//! log points straight at the command to reproduce.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while collecting a diff from git.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be started.
    #[error("failed to run `git {args}` in {dir}: {source}")]
    Spawn {
        args: String,
        dir: PathBuf,
        source: std::io::Error,
    },

    /// Git ran but exited unsuccessfully (not a repository, unknown revision, ...).
    #[error("`git {args}` exited with {status}: {stderr}")]
    Failed {
        args: String,
        status: String,
        stderr: String,
    },

    /// Git produced output that is not valid UTF-8.
    #[error("`git {args}` produced non-UTF-8 output")]
    NonUtf8 { args: String },
}

/// Result type alias for git operations.
pub type GitResult<T> = Result<T, GitError>;
