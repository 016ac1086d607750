//! # Import Statement Recognition
//!
//! Line-level heuristics over added diff text. Two shapes are recognized:
//!
//! - `from <module> import ...`
//! - `import <module>`
//!
//! The module path is normalized from dotted to `/`-separated form, and its
//! first two segments name the referenced pack (`runbooks/teamA`).
//!
//! Multi-line, aliased-list and relative imports are not resolved. The
//! importing file's own pack is not considered either: an import of
//! `runbooks.teamB.x` from inside `runbooks/teamB` is reported like any
//! other.

use std::sync::LazyLock;

use regex::Regex;

static FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*from\s+(\S+)\s+import").expect("valid regex"));

static PLAIN_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+(\S+)").expect("valid regex"));

/// Module path imported by `line`, in `/`-separated form.
///
/// `from` imports take precedence; a line matching neither shape yields
/// `None`.
pub fn imported_module(line: &str) -> Option<String> {
    FROM_IMPORT
        .captures(line)
        .or_else(|| PLAIN_IMPORT.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace('.', "/"))
}

/// The first two segments of a `/`-separated module path, joined by `/`.
///
/// Paths with a single segment (`os`) cannot name a pack and yield `None`.
pub fn pack_prefix(module_path: &str) -> Option<String> {
    let mut segments = module_path.split('/');
    let first = segments.next()?;
    let second = segments.next()?;
    Some(format!("{first}/{second}"))
}

/// Pack path referenced by an added line, if it is an import.
pub fn referenced_pack(line: &str) -> Option<String> {
    imported_module(line).as_deref().and_then(pack_prefix)
}
