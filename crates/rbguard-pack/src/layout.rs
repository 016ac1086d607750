//! # Runbook Layout
//!
//! Where packs live. Every pack is a directory directly under the runbooks
//! root (by default `runbooks/`), and a pack is referred to by its
//! repository-relative path, e.g. `runbooks/network`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{PackError, PackResult};

/// Default runbooks root, relative to the repository root.
pub const DEFAULT_RUNBOOKS_ROOT: &str = "runbooks";

/// Canonical repository-relative form of a runbooks root.
///
/// Drops `.` segments and repeated or trailing slashes, so `./runbooks/`
/// becomes `runbooks`. Absolute roots, `..` segments and roots that reduce
/// to nothing are rejected: git reports paths relative to the repository
/// root and none of those could ever match.
pub fn normalize_root(root: &str) -> PackResult<String> {
    let invalid = |reason: &str| PackError::InvalidRoot {
        root: root.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = root.trim();
    if trimmed.starts_with('/') || trimmed.starts_with('\\') {
        return Err(invalid("must be relative to the repository root"));
    }

    let mut segments = Vec::new();
    for segment in trimmed.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(invalid("must not contain `..`")),
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        return Err(invalid("must name a directory"));
    }
    Ok(segments.join("/"))
}

/// Whether the repository-relative `path` lies under `root`.
pub fn is_under_root(root: &str, path: &str) -> bool {
    path.strip_prefix(root.trim_end_matches('/'))
        .is_some_and(|rest| rest.starts_with('/'))
}

/// The runbooks root inside a repository checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunbookLayout {
    repo_root: PathBuf,
    root: String,
}

impl RunbookLayout {
    /// `root` is repository-relative and `/`-separated; trailing slashes are ignored.
    pub fn new(repo_root: impl Into<PathBuf>, root: &str) -> Self {
        Self {
            repo_root: repo_root.into(),
            root: root.trim_end_matches('/').to_string(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Repository-relative root name, e.g. `runbooks`.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Absolute (or CWD-relative) location of the root on disk.
    pub fn root_dir(&self) -> PathBuf {
        self.repo_root.join(&self.root)
    }

    /// List the immediate subdirectories of the root as pack paths.
    ///
    /// Fails if the root itself does not exist: a repository without a
    /// runbooks tree cannot be validated.
    pub fn pack_directories(&self) -> PackResult<PackDirectorySet> {
        let dir = self.root_dir();
        if !dir.is_dir() {
            return Err(PackError::RootNotFound { path: dir });
        }

        let mut packs = PackDirectorySet::default();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => packs.insert(format!("{}/{}", self.root, name)),
                None => {
                    tracing::warn!(
                        dir = %entry.path().display(),
                        "skipping pack directory with non-UTF-8 name"
                    );
                }
            }
        }

        tracing::debug!(count = packs.len(), root = %self.root, "discovered pack directories");
        Ok(packs)
    }
}

/// Repository-relative pack directory paths (`runbooks/<name>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackDirectorySet {
    paths: BTreeSet<String>,
}

impl PackDirectorySet {
    pub fn insert(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PackDirectorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}
