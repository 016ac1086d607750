//! # Pack Manifests
//!
//! Discovers `pack.yaml` files under the runbooks root and extracts the pack
//! identifier each one declares in its `ref` key.
//!
//! Discovery only matches files named exactly `pack.yaml`. The `.yml`
//! spelling is still recognized when deciding whether a *changed* file is a
//! manifest (see [`is_manifest_path`]).

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use walkdir::WalkDir;

use crate::error::{PackError, PackResult};
use crate::parser;

/// File name discovered by the scanner.
pub const MANIFEST_FILE_NAME: &str = "pack.yaml";

/// Suffixes that mark a changed file as a manifest.
pub const MANIFEST_SUFFIXES: [&str; 2] = ["pack.yaml", "pack.yml"];

/// Label stripped from identifiers.
pub const REF_LABEL: &str = "ref: ";

/// A discovered manifest and the identifier it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackManifest {
    pub path: PathBuf,
    pub pack_ref: String,
}

/// Whether a repository-relative path names a pack manifest.
///
/// This is a suffix test, so `runbooks/a/mypack.yaml` also qualifies.
pub fn is_manifest_path(path: &str) -> bool {
    MANIFEST_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

/// Remove every occurrence of the `ref: ` label from an identifier.
pub fn strip_ref_label(raw: &str) -> String {
    raw.replace(REF_LABEL, "")
}

/// Read the pack identifier declared by one manifest.
pub fn read_pack_ref(path: &Path) -> PackResult<String> {
    let doc = parser::load_yaml_value(path)?;

    let value = match &doc {
        Value::Mapping(map) => map.get("ref"),
        _ => None,
    }
    .ok_or_else(|| PackError::MissingRef {
        path: path.to_path_buf(),
    })?;

    match value {
        Value::String(s) => Ok(strip_ref_label(s)),
        Value::Null => Err(PackError::MissingRef {
            path: path.to_path_buf(),
        }),
        other => Err(PackError::InvalidRef {
            path: path.to_path_buf(),
            detail: format!("expected a string, found {}", yaml_kind(other)),
        }),
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Find every `pack.yaml` under `root` and read its identifier.
///
/// A missing root yields no manifests. Directories that cannot be listed
/// are skipped with a warning; the first unreadable or unparsable manifest
/// aborts the scan. Symlinked directories are not descended into, but a
/// manifest that is itself a symlink to a file is read.
pub fn scan_pack_manifests(root: &Path) -> PackResult<Vec<PackManifest>> {
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "runbooks root not found; no manifests scanned");
        return Ok(Vec::new());
    }

    let mut manifests = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry under runbooks root");
                continue;
            }
        };
        if entry.file_name() != MANIFEST_FILE_NAME {
            continue;
        }
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let pack_ref = read_pack_ref(entry.path())?;
        tracing::debug!(manifest = %entry.path().display(), pack_ref = %pack_ref, "read pack ref");
        manifests.push(PackManifest {
            path: entry.into_path(),
            pack_ref,
        });
    }

    tracing::info!(count = manifests.len(), root = %root.display(), "scanned pack manifests");
    Ok(manifests)
}

/// Identifiers declared by every `pack.yaml` under `root`, not deduplicated.
pub fn scan_pack_refs(root: &Path) -> PackResult<Vec<String>> {
    Ok(scan_pack_manifests(root)?
        .into_iter()
        .map(|m| m.pack_ref)
        .collect())
}
