//! # Pack Rules
//!
//! The two detectors run over a [`ChangeSet`]:
//!
//! 1. **Cross-pack imports**: an added import line in a runbook source file
//!    whose two-segment module prefix names a pack directory.
//! 2. **Duplicate pack names**: an added `ref:` line in a changed manifest
//!    whose identifier is already declared by a manifest on disk.
//!
//! Both report in change-set order: files as git listed them, then lines
//! within each file.
//!
//! ## Self-match
//!
//! Known identifiers are scanned from the checked-out tree, which already
//! contains the commit under review. A `ref:` line added by that commit is
//! therefore always among the known identifiers and is always reported,
//! even when the name is unique across the repository.

use rbguard_core::{ChangeSet, Violation};

use crate::imports;
use crate::layout::{is_under_root, PackDirectorySet, DEFAULT_RUNBOOKS_ROOT};
use crate::manifest::{is_manifest_path, strip_ref_label};

/// Prefix an added manifest line must start with to be checked.
pub const REF_LINE_PREFIX: &str = "ref:";

/// Which files the rules look at and which rules are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOptions {
    /// Repository-relative runbooks root.
    pub root: String,
    /// Extensions (without the dot) of files scanned for imports.
    pub source_extensions: Vec<String>,
    /// Run the cross-pack import detector.
    pub cross_pack: bool,
    /// Run the duplicate pack name detector.
    pub pack_name: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            root: DEFAULT_RUNBOOKS_ROOT.to_string(),
            source_extensions: vec!["py".to_string()],
            cross_pack: true,
            pack_name: true,
        }
    }
}

impl RuleOptions {
    fn is_source_file(&self, path: &str) -> bool {
        self.source_extensions.iter().any(|ext| {
            path.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

/// Report added import lines that reach into a pack directory.
pub fn find_cross_pack_imports(
    changes: &ChangeSet,
    packs: &PackDirectorySet,
    options: &RuleOptions,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for file in changes {
        if !is_under_root(&options.root, &file.path) || !options.is_source_file(&file.path) {
            continue;
        }
        for line in &file.added_lines {
            let Some(pack) = imports::referenced_pack(line) else {
                continue;
            };
            if packs.contains(&pack) {
                tracing::debug!(file = %file.path, pack = %pack, "cross pack import");
                violations.push(Violation::cross_pack_import(&file.path, line));
            }
        }
    }

    violations
}

/// Report added `ref:` lines whose identifier is already known.
pub fn find_duplicate_pack_names(
    changes: &ChangeSet,
    known_refs: &[String],
    options: &RuleOptions,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for file in changes {
        if !is_under_root(&options.root, &file.path) || !is_manifest_path(&file.path) {
            continue;
        }
        for line in &file.added_lines {
            if !line.starts_with(REF_LINE_PREFIX) {
                continue;
            }
            let pack_ref = strip_ref_label(line);
            if known_refs.iter().any(|known| *known == pack_ref) {
                tracing::debug!(file = %file.path, pack_ref = %pack_ref, "duplicate pack name");
                violations.push(Violation::duplicate_pack_name(&file.path, line));
            }
        }
    }

    violations
}

/// Run every enabled rule. Cross-pack violations come first.
pub fn validate(
    changes: &ChangeSet,
    packs: &PackDirectorySet,
    known_refs: &[String],
    options: &RuleOptions,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if options.cross_pack {
        violations.extend(find_cross_pack_imports(changes, packs, options));
    }
    if options.pack_name {
        violations.extend(find_duplicate_pack_names(changes, known_refs, options));
    }

    tracing::info!(
        files = changes.len(),
        added_lines = changes.added_line_count(),
        violations = violations.len(),
        "evaluated pack rules"
    );
    violations
}
