//! # Sync Command
//!
//! This module implements the header synchronization command. This is the
//! default command when no subcommand is specified.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{Config, load_config};
use crate::diff::DiffManager;
use crate::git;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_start_message, print_summary};
use crate::processor::Processor;

/// Arguments for the sync command
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
  /// Consider only the changes after the given commit (branch, tag, or
  /// hash). Defaults to the repository's very first commit.
  #[arg(long, short = 'f', value_name = "COMMIT")]
  pub from: Option<String>,

  /// Dry run mode: report and diff without modifying files
  #[arg(long)]
  pub dry_run: bool,

  /// Show diff of changes on stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of changes to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Path to config file (default: .licsync.toml in the repository root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Project name for the banner and license text (overrides config)
  #[arg(long, value_name = "NAME")]
  pub project: Option<String>,

  /// Copyright holder attributed for git-derived years (overrides config)
  #[arg(long, value_name = "NAME")]
  pub holder: Option<String>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the sync command with the given arguments
pub fn run_sync(args: SyncArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for the verbose_log! macro and output formatting
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;
  let repo = git::discover_repo(&current_dir)?;
  let repo_root = git::workdir(&repo)?;
  debug!("Using repository root: {}", repo_root.display());

  let config = resolve_config(&args, &repo_root)?;

  let since = match &args.from {
    Some(spec) => git::resolve_commit(&repo, spec)?,
    None => git::first_commit(&repo)?,
  };
  debug!("Diffing from ancestor commit {}", since);

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  let processor = Processor::new(&config, &args.ignore, args.dry_run, Some(diff_manager))?;

  // Collect once so the start message can show the count, then reuse.
  let candidates = processor.candidates(&repo, since)?;
  print_start_message(candidates.len(), args.dry_run);

  let stats = processor.run_collected(&repo, since, &candidates)?;
  print_summary(&stats, args.dry_run);

  if stats.failures > 0 || (args.dry_run && stats.files_modified > 0) {
    process::exit(1);
  }

  Ok(())
}

/// Loads the config file and applies CLI identity overrides. Identity must
/// come from somewhere: a config file, the flags, or both.
fn resolve_config(args: &SyncArgs, repo_root: &Path) -> Result<Config> {
  let loaded = load_config(args.config.as_deref(), repo_root, args.no_config)?;

  let mut config = match loaded {
    Some(config) => config,
    None => {
      let (Some(project), Some(holder)) = (&args.project, &args.holder) else {
        eprintln!("ERROR: No config file found; --project and --holder are required");
        process::exit(1);
      };
      Config::with_identity(project.clone(), holder.clone())
    }
  };

  if let Some(project) = &args.project {
    config.project = project.clone();
  }
  if let Some(holder) = &args.holder {
    config.holder = holder.clone();
  }

  // A relative template path in the config is relative to the repo root.
  if let Some(template) = &config.license_template
    && template.is_relative()
  {
    config.license_template = Some(repo_root.join(template));
  }

  config.validate()?;
  Ok(config)
}
