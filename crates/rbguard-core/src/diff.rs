//! # Change Set
//!
//! The lines a commit added, grouped by file.
//!
//! A [`ChangeSet`] keeps files in the order git listed them and lines in
//! diff order. Nothing is deduplicated: a line added twice appears twice,
//! and rule evaluators report it twice.

use serde::Serialize;

/// One changed file and the lines it gained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedFile {
    /// Repository-relative path, `/`-separated as git prints it.
    pub path: String,
    /// Added lines with the `+` marker and leading whitespace removed.
    pub added_lines: Vec<String>,
}

impl ChangedFile {
    pub fn new(path: impl Into<String>, added_lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            added_lines,
        }
    }
}

/// Ordered mapping from changed file to its added lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    files: Vec<ChangedFile>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file. Files keep insertion order.
    pub fn push(&mut self, file: ChangedFile) {
        self.files.push(file);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total number of added lines across all files.
    pub fn added_line_count(&self) -> usize {
        self.files.iter().map(|f| f.added_lines.len()).sum()
    }
}

impl FromIterator<ChangedFile> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ChangedFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangedFile;
    type IntoIter = std::slice::Iter<'a, ChangedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Parse `git diff --name-only` output into file paths, skipping blank lines.
pub fn parse_name_only(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract added lines from unified diff text.
///
/// Keeps lines starting with `+` except the `+++` file header, then drops
/// the marker and any leading whitespace. Removed and context lines are
/// ignored.
pub fn parse_added_lines(diff: &str) -> Vec<String> {
    diff.lines()
        .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
        .map(|line| line[1..].trim_start().to_string())
        .collect()
}
