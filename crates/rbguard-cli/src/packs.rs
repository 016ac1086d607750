//! # Packs Subcommand
//!
//! Lists what the gate sees under the runbooks root: pack directories (the
//! cross-pack import targets) and the `ref` each `pack.yaml` declares.
//! Refs declared by more than one manifest are called out, since every
//! later change to those manifests will trip the duplicate name rule.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use rbguard_pack::layout::normalize_root;
use rbguard_pack::manifest::scan_pack_manifests;
use rbguard_pack::RunbookLayout;

use crate::config::GuardConfig;

/// Arguments for the `rbguard packs` subcommand.
#[derive(Args, Debug, Default)]
pub struct PacksArgs {
    /// Runbooks root, relative to the repository root [default: runbooks].
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Emit the inventory as JSON.
    #[arg(long)]
    pub json: bool,
}

/// One manifest and the ref it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Path relative to the repository root.
    pub path: String,
    #[serde(rename = "ref")]
    pub pack_ref: String,
}

/// Everything found under the runbooks root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackInventory {
    pub root: String,
    pub directories: Vec<String>,
    pub manifests: Vec<ManifestEntry>,
    /// Refs declared by two or more manifests, in lexical order.
    pub duplicate_refs: Vec<String>,
}

/// Build the inventory for a layout.
pub fn collect_inventory(layout: &RunbookLayout) -> Result<PackInventory> {
    let directories: Vec<String> = layout
        .pack_directories()
        .context("failed to list pack directories")?
        .iter()
        .map(str::to_string)
        .collect();

    let manifests: Vec<ManifestEntry> = scan_pack_manifests(&layout.root_dir())
        .context("failed to scan pack manifests")?
        .into_iter()
        .map(|m| ManifestEntry {
            path: m
                .path
                .strip_prefix(layout.repo_root())
                .unwrap_or(&m.path)
                .to_string_lossy()
                .replace('\\', "/"),
            pack_ref: m.pack_ref,
        })
        .collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &manifests {
        *counts.entry(entry.pack_ref.as_str()).or_default() += 1;
    }
    let duplicate_refs: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(r, _)| r.to_string())
        .collect();

    Ok(PackInventory {
        root: layout.root().to_string(),
        directories,
        manifests,
        duplicate_refs,
    })
}

/// Execute the packs subcommand.
pub fn run_packs(args: &PacksArgs, config: &GuardConfig, repo_root: &Path) -> Result<u8> {
    let root = match args.root {
        Some(ref root) => normalize_root(root).context("--root")?,
        None => config.rule_options()?.root,
    };
    let layout = RunbookLayout::new(repo_root, &root);
    let inventory = collect_inventory(&layout)?;

    for dup in &inventory.duplicate_refs {
        tracing::warn!(pack_ref = %dup, "pack ref declared by more than one manifest");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(0);
    }

    println!("Pack directories under {}/: {}", inventory.root, inventory.directories.len());
    for dir in &inventory.directories {
        println!("  {dir}");
    }
    println!("Pack manifests: {}", inventory.manifests.len());
    for entry in &inventory.manifests {
        println!("  {}  ({})", entry.pack_ref, entry.path);
    }
    if !inventory.duplicate_refs.is_empty() {
        println!("Duplicate refs: {}", inventory.duplicate_refs.join(", "));
    }

    Ok(0)
}
