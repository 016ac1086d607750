//! # rbguard-core — Foundational Types
//!
//! Shared building blocks for the runbook pack guard:
//!
//! - **Change set** ([`diff`]): the files touched by a commit and the lines
//!   each one gained, in the order git reports them.
//! - **Diff collector** ([`git`]): shells out to `git diff` for a two-point
//!   commit range and turns its output into a [`ChangeSet`].
//! - **Violations** ([`violation`]): the records rule evaluators emit.
//!
//! ## Crate Policy
//!
//! - No knowledge of packs, manifests or rules lives here; that belongs to
//!   `rbguard-pack`.
//! - Git failures are surfaced as [`GitError`] and never retried.

pub mod diff;
pub mod error;
pub mod git;
pub mod violation;

pub use diff::{ChangeSet, ChangedFile};
pub use error::{GitError, GitResult};
pub use git::{CommitRange, GitDiffCollector};
pub use violation::{Violation, ViolationKind};
