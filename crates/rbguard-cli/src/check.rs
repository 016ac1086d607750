//! # Check Subcommand
//!
//! The pull request gate. Runs the whole pipeline once:
//!
//! 1. Collect the lines added between `base` and `head` (git).
//! 2. Scan `pack.yaml` manifests under the runbooks root for known refs.
//! 3. List pack directories under the root.
//! 4. Evaluate the cross-pack import and duplicate pack name rules.
//! 5. Print the banner and, on request, the violations.
//!
//! Any git or manifest failure aborts the run with an error. Violations do
//! not: by default the command still exits 0 and the caller decides what a
//! non-empty list means.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use rbguard_core::{CommitRange, GitDiffCollector, Violation};
use rbguard_pack::layout::normalize_root;
use rbguard_pack::{scan_pack_refs, validate, RuleOptions, RunbookLayout};

use crate::config::{ExitPolicy, GuardConfig};
use crate::report;

/// Arguments for the `rbguard check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Base revision of the diff [default: HEAD~1].
    #[arg(long, value_name = "REV")]
    pub base: Option<String>,

    /// Head revision of the diff [default: HEAD].
    #[arg(long, value_name = "REV")]
    pub head: Option<String>,

    /// Runbooks root, relative to the repository root [default: runbooks].
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Print every violation after the banner.
    #[arg(long)]
    pub details: bool,

    /// When violations should produce a non-zero exit code.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub exit_on_failure: Option<ExitPolicy>,

    /// Print the violations as JSON on stdout; the banner goes to stderr.
    #[arg(long)]
    pub json: bool,
}

/// Effective settings for one check run: config file values with CLI
/// overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSettings {
    pub range: CommitRange,
    pub rules: RuleOptions,
    pub show_details: bool,
    pub exit_policy: ExitPolicy,
    pub ci_env_var: String,
}

impl CheckSettings {
    pub fn resolve(args: &CheckArgs, config: &GuardConfig) -> Result<Self> {
        let mut rules = config.rule_options()?;
        if let Some(ref root) = args.root {
            rules.root = normalize_root(root).context("--root")?;
        }
        Ok(Self {
            range: CommitRange::new(
                args.base.clone().unwrap_or_else(|| config.base_rev.clone()),
                args.head.clone().unwrap_or_else(|| config.head_rev.clone()),
            ),
            rules,
            show_details: args.details || config.show_details,
            exit_policy: args.exit_on_failure.unwrap_or(config.exit_policy),
            ci_env_var: config.ci_env_var.clone(),
        })
    }
}

/// Run the pipeline against a checkout and return the violations found.
///
/// `rules.root` may be given in any form [`normalize_root`] accepts.
pub fn check_repository(
    repo_root: &Path,
    range: &CommitRange,
    rules: &RuleOptions,
) -> Result<Vec<Violation>> {
    let rules = RuleOptions {
        root: normalize_root(&rules.root)?,
        ..rules.clone()
    };

    let collector = GitDiffCollector::new(repo_root, range.clone());
    tracing::debug!(
        repo = %collector.repo_dir().display(),
        range = %collector.range(),
        "collecting diff"
    );
    let changes = collector
        .collect()
        .with_context(|| format!("failed to collect diff for {range}"))?;

    let layout = RunbookLayout::new(repo_root, &rules.root);
    let known_refs = scan_pack_refs(&layout.root_dir())
        .with_context(|| format!("failed to scan pack manifests under {}", layout.root()))?;
    let packs = layout
        .pack_directories()
        .context("failed to list pack directories")?;

    Ok(validate(&changes, &packs, &known_refs, &rules))
}

/// Execute the check subcommand.
///
/// Returns the exit code chosen by the exit policy; 0 unless configured
/// otherwise.
pub fn run_check(args: &CheckArgs, config: &GuardConfig, repo_root: &Path) -> Result<u8> {
    let settings = CheckSettings::resolve(args, config)?;
    let ci_mode = std::env::var_os(&settings.ci_env_var).is_some();
    tracing::debug!(
        ci_mode,
        ci_env_var = %settings.ci_env_var,
        range = %settings.range,
        root = %settings.rules.root,
        "starting runbook validation"
    );

    let violations = check_repository(repo_root, &settings.range, &settings.rules)?;
    if !violations.is_empty() {
        tracing::info!(count = violations.len(), "runbook validation failed");
    }

    // With --json, stdout carries only the JSON document.
    if args.json {
        report::write_report(&mut std::io::stderr().lock(), &violations, settings.show_details)?;
        let mut out = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &violations)?;
        writeln!(out)?;
    } else {
        report::write_report(&mut std::io::stdout().lock(), &violations, settings.show_details)?;
    }

    Ok(settings
        .exit_policy
        .exit_code(!violations.is_empty(), ci_mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_from_config() {
        let settings = CheckSettings::resolve(&CheckArgs::default(), &GuardConfig::default()).unwrap();
        assert_eq!(settings.range, CommitRange::default());
        assert_eq!(settings.rules, RuleOptions::default());
        assert!(!settings.show_details);
        assert_eq!(settings.exit_policy, ExitPolicy::Never);
        assert_eq!(settings.ci_env_var, "JENKINS_URL");
    }

    #[test]
    fn cli_flags_override_config() {
        let config = GuardConfig {
            base_rev: "origin/main".to_string(),
            exit_policy: ExitPolicy::OutsideCi,
            ..GuardConfig::default()
        };
        let args = CheckArgs {
            head: Some("feature".to_string()),
            root: Some("playbooks/".to_string()),
            details: true,
            exit_on_failure: Some(ExitPolicy::Always),
            ..CheckArgs::default()
        };

        let settings = CheckSettings::resolve(&args, &config).unwrap();
        assert_eq!(settings.range, CommitRange::new("origin/main", "feature"));
        assert_eq!(settings.rules.root, "playbooks");
        assert!(settings.show_details);
        assert_eq!(settings.exit_policy, ExitPolicy::Always);
    }

    #[test]
    fn config_details_flag_is_honoured() {
        let config = GuardConfig {
            show_details: true,
            ..GuardConfig::default()
        };
        assert!(CheckSettings::resolve(&CheckArgs::default(), &config).unwrap().show_details);
    }

    #[test]
    fn cli_root_is_normalized() {
        let args = CheckArgs {
            root: Some("./runbooks".to_string()),
            ..CheckArgs::default()
        };
        let settings = CheckSettings::resolve(&args, &GuardConfig::default()).unwrap();
        assert_eq!(settings.rules.root, "runbooks");
    }

    #[test]
    fn cli_root_that_cannot_match_is_rejected() {
        for root in ["/", "/abs/runbooks", "../runbooks", ""] {
            let args = CheckArgs {
                root: Some(root.to_string()),
                ..CheckArgs::default()
            };
            let err = CheckSettings::resolve(&args, &GuardConfig::default()).unwrap_err();
            assert!(format!("{err:#}").contains("--root"), "{root:?}");
        }
    }

    #[test]
    fn check_outside_git_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("runbooks")).unwrap();
        let result = check_repository(dir.path(), &CommitRange::default(), &RuleOptions::default());
        assert!(result.is_err());
    }
}
