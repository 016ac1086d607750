//! # rbguard CLI entry point
//!
//! Parses command-line arguments, sets up logging and colors, loads the
//! config file and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rbguard_cli::check::{run_check, CheckArgs};
use rbguard_cli::config::GuardConfig;
use rbguard_cli::packs::{run_packs, PacksArgs};

/// Runbook pack guard.
///
/// Rejects commits that import code across runbook pack boundaries or
/// declare a pack name that already exists.
#[derive(Parser, Debug)]
#[command(name = "rbguard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file [default: .rbguard.yaml in the repository root].
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the latest commit against the pack rules.
    Check(CheckArgs),

    /// List pack directories and declared pack refs.
    Packs(PacksArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    tracing::debug!("rbguard CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let repo_root = rbguard_cli::find_repo_root(&cwd).unwrap_or_else(|| {
        tracing::warn!("Could not locate repository root; using current directory");
        cwd.clone()
    });

    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let config = match GuardConfig::load(cli.config.as_deref(), &repo_root) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, &config, &repo_root),
        Commands::Packs(args) => run_packs(&args, &config, &repo_root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
