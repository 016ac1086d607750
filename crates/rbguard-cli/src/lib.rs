//! # rbguard-cli — Runbook Pack Gate
//!
//! Provides the `rbguard` command-line interface used as a pull request
//! check on runbook repositories.
//!
//! ## Subcommands
//!
//! - `rbguard check` — Validate the latest commit: no cross-pack imports,
//!   no duplicate pack names.
//! - `rbguard packs` — List pack directories and declared pack refs.
//!
//! ```bash
//! rbguard check
//! rbguard check --details --exit-on-failure always
//! rbguard packs --json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing and output live here; detection logic lives in
//!   `rbguard-pack` and `rbguard-core`.
//! - `rbguard check` exits 0 even when violations are found unless an exit
//!   policy says otherwise.

pub mod check;
pub mod config;
pub mod packs;
pub mod report;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to the repository root.
///
/// If the path is absolute, returns it as-is. If relative and the file
/// exists relative to `repo_root`, uses that. Otherwise returns the path
/// relative to the current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from `start` to the first directory containing `.git`.
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
