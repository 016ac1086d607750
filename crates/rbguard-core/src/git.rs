//! # Git Diff Collector
//!
//! Reads the lines added between two revisions by invoking the `git`
//! binary. One `--name-only` call lists the changed files, then one
//! zero-context diff per file yields its added lines.
//!
//! Any git failure aborts collection. There is no retry: a repository with
//! fewer than two commits or a directory outside version control is a
//! configuration problem the caller must surface.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::diff::{parse_added_lines, parse_name_only, ChangeSet, ChangedFile};
use crate::error::{GitError, GitResult};

/// Default base revision: the immediate parent of `HEAD`.
pub const DEFAULT_BASE_REV: &str = "HEAD~1";

/// Default head revision.
pub const DEFAULT_HEAD_REV: &str = "HEAD";

/// A two-point revision range. Only `base..head` is diffed; merge parents
/// beyond the first are never considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub base: String,
    pub head: String,
}

impl CommitRange {
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            head: head.into(),
        }
    }
}

impl Default for CommitRange {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_REV, DEFAULT_HEAD_REV)
    }
}

impl std::fmt::Display for CommitRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.base, self.head)
    }
}

/// Collects a [`ChangeSet`] from a git working tree.
#[derive(Debug, Clone)]
pub struct GitDiffCollector {
    repo_dir: PathBuf,
    range: CommitRange,
}

impl GitDiffCollector {
    pub fn new(repo_dir: impl Into<PathBuf>, range: CommitRange) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            range,
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    pub fn range(&self) -> &CommitRange {
        &self.range
    }

    /// List the files that differ between the range endpoints.
    pub fn changed_files(&self) -> GitResult<Vec<String>> {
        let output = self.run_git(&[
            "diff",
            "--name-only",
            self.range.base.as_str(),
            self.range.head.as_str(),
        ])?;
        Ok(parse_name_only(&output))
    }

    /// Added lines for a single file within the range.
    pub fn added_lines(&self, file: &str) -> GitResult<Vec<String>> {
        let output = self.run_git(&[
            "diff",
            "--unified=0",
            self.range.base.as_str(),
            self.range.head.as_str(),
            "--",
            file,
        ])?;
        Ok(parse_added_lines(&output))
    }

    /// Read the full change set. Files keep git's listing order.
    pub fn collect(&self) -> GitResult<ChangeSet> {
        let files = self.changed_files()?;
        tracing::info!(
            range = %self.range,
            file_count = files.len(),
            "collected changed files"
        );

        let mut changes = ChangeSet::new();
        for file in files {
            let added = self.added_lines(&file)?;
            tracing::debug!(file = %file, added = added.len(), "collected added lines");
            changes.push(ChangedFile::new(file, added));
        }
        Ok(changes)
    }

    fn run_git(&self, args: &[&str]) -> GitResult<String> {
        let joined = args.join(" ");
        tracing::trace!(args = %joined, dir = %self.repo_dir.display(), "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|source| GitError::Spawn {
                args: joined.clone(),
                dir: self.repo_dir.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                args: joined,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| GitError::NonUtf8 { args: joined })
    }
}
