//! # rbguard-pack — Runbook Pack Rules
//!
//! Everything that knows what a runbook pack is:
//!
//! - **Layout** ([`layout`]): the `runbooks/` root and the set of pack
//!   directories directly beneath it.
//! - **Manifests** ([`manifest`]): discovery of `pack.yaml` files and
//!   extraction of each pack's declared `ref`.
//! - **Imports** ([`imports`]): single-line `from X import` / `import X`
//!   recognition on diff text.
//! - **Rules** ([`rules`]): the cross-pack import and duplicate pack name
//!   detectors, run over a [`ChangeSet`](rbguard_core::ChangeSet).
//!
//! ## Data Format
//!
//! A pack manifest is a YAML mapping with at least a string `ref` entry:
//!
//! ```yaml
//! ref: network-diagnostics
//! ```

pub mod error;
pub mod imports;
pub mod layout;
pub mod manifest;
pub mod parser;
pub mod rules;

pub use error::{PackError, PackResult};
pub use layout::{PackDirectorySet, RunbookLayout};
pub use manifest::scan_pack_refs;
pub use rules::{validate, RuleOptions};
