//! # Configuration
//!
//! Optional YAML settings, read from `--config <path>` or from
//! `.rbguard.yaml` at the repository root. Every field has a default, so a
//! repository without a config file gets the stock behaviour: diff
//! `HEAD~1..HEAD`, check `runbooks/`, both rules on, always exit 0.
//!
//! ```yaml
//! runbooks_root: runbooks
//! source_extensions: [py]
//! validations:
//!   cross_pack: true
//!   pack_name: true
//! exit_policy: outside-ci
//! ci_env_var: JENKINS_URL
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use rbguard_core::git::{DEFAULT_BASE_REV, DEFAULT_HEAD_REV};
use rbguard_pack::layout::{normalize_root, DEFAULT_RUNBOOKS_ROOT};
use rbguard_pack::{parser, RuleOptions};

/// Config file looked up at the repository root when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".rbguard.yaml";

/// Environment variable whose presence marks a CI runner.
pub const DEFAULT_CI_ENV_VAR: &str = "JENKINS_URL";

/// When a failed check turns into a non-zero exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Report only; always exit 0.
    #[default]
    Never,
    /// Exit 1 whenever violations are found.
    Always,
    /// Exit 1 on violations unless running on a CI runner.
    OutsideCi,
}

impl ExitPolicy {
    /// Exit code for a finished check.
    #[must_use]
    pub const fn exit_code(self, failed: bool, ci_mode: bool) -> u8 {
        let fail = match self {
            Self::Never => false,
            Self::Always => failed,
            Self::OutsideCi => failed && !ci_mode,
        };
        if fail {
            1
        } else {
            0
        }
    }
}

/// Per-rule switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Validations {
    pub cross_pack: bool,
    pub pack_name: bool,
}

impl Default for Validations {
    fn default() -> Self {
        Self {
            cross_pack: true,
            pack_name: true,
        }
    }
}

/// Settings for a run. CLI flags override these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    pub runbooks_root: String,
    pub source_extensions: Vec<String>,
    pub validations: Validations,
    pub base_rev: String,
    pub head_rev: String,
    pub show_details: bool,
    pub exit_policy: ExitPolicy,
    pub ci_env_var: String,
    pub color: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            runbooks_root: DEFAULT_RUNBOOKS_ROOT.to_string(),
            source_extensions: vec!["py".to_string()],
            validations: Validations::default(),
            base_rev: DEFAULT_BASE_REV.to_string(),
            head_rev: DEFAULT_HEAD_REV.to_string(),
            show_details: false,
            exit_policy: ExitPolicy::Never,
            ci_env_var: DEFAULT_CI_ENV_VAR.to_string(),
            color: true,
        }
    }
}

impl GuardConfig {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `.rbguard.yaml` at the
    /// repository root is used when present, else the defaults.
    pub fn load(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                let resolved = crate::resolve_path(p, repo_root);
                if !resolved.is_file() {
                    bail!("config file not found: {}", resolved.display());
                }
                resolved
            }
            None => {
                let candidate = repo_root.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no config file; using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let config: Self = parser::load_yaml_typed(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        config.check()?;
        tracing::debug!(config = %path.display(), "loaded config");
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        normalize_root(&self.runbooks_root).context("runbooks_root")?;
        if self.source_extensions.iter().any(|e| e.is_empty() || e.starts_with('.')) {
            bail!("source_extensions entries must be non-empty and given without a leading dot");
        }
        Ok(())
    }

    /// Rule options derived from these settings, with the root normalized.
    pub fn rule_options(&self) -> Result<RuleOptions> {
        Ok(RuleOptions {
            root: normalize_root(&self.runbooks_root).context("runbooks_root")?,
            source_extensions: self.source_extensions.clone(),
            cross_pack: self.validations.cross_pack,
            pack_name: self.validations.pack_name,
        })
    }
}
