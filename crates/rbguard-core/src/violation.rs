//! Violation records emitted by rule evaluators.
//!
//! The human-readable rendering is the contract CI logs depend on:
//!
//! ```text
//! cross pack import is not allowed:
//!  - file path: runbooks/teamB/tasks/run.py
//!  - line: from runbooks.teamA.util import helper
//! ```

use std::fmt;

use serde::Serialize;

/// Which rule produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A runbook source file imports from another pack directory.
    CrossPackImport,
    /// A manifest declares a pack `ref` that is already known.
    DuplicatePackName,
}

impl ViolationKind {
    /// Reason text used as the first line of the rendered violation.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::CrossPackImport => "cross pack import is not allowed",
            Self::DuplicatePackName => "duplicate pack name is not allowed",
        }
    }
}

/// A single offending added line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Repository-relative path of the changed file.
    pub file: String,
    /// The added line text, as collected from the diff.
    pub line: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, file: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.into(),
            line: line.into(),
        }
    }

    pub fn cross_pack_import(file: impl Into<String>, line: impl Into<String>) -> Self {
        Self::new(ViolationKind::CrossPackImport, file, line)
    }

    pub fn duplicate_pack_name(file: impl Into<String>, line: impl Into<String>) -> Self {
        Self::new(ViolationKind::DuplicatePackName, file, line)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\n - file path: {}\n - line: {}",
            self.kind.reason(),
            self.file,
            self.line
        )
    }
}
