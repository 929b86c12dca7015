//! # Output Module
//!
//! This module centralizes user-facing output for the licsync tool.
//! Per-file diagnostics go to stderr so stdout stays predictable for
//! piping; the run summary goes to stdout.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_quiet;
use crate::processor::SyncStats;

/// Symbols used in output
pub mod symbols {
  /// All files in sync
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Per-file failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Print the initial "Syncing N files..." message.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Syncing" };
  let files_word = if file_count == 1 { "file" } else { "files" };
  println!("{verb} {file_count} {files_word}...");
}

/// Per-file diagnostic: the banner was absent and a header will be added.
pub fn print_header_added(path: &Path) {
  if is_quiet() {
    return;
  }
  eprintln!(
    "{} doesn't have a license header; it will be added.",
    path.display().if_supports_color(Stream::Stderr, |p| p.yellow())
  );
}

/// Per-file diagnostic: the rewritten contents differ and the file is being
/// overwritten (or would be, in dry-run mode).
pub fn print_file_modified(path: &Path, dry_run: bool) {
  if is_quiet() {
    return;
  }
  if dry_run {
    eprintln!(
      "{} is out of sync.",
      path.display().if_supports_color(Stream::Stderr, |p| p.yellow())
    );
  } else {
    eprintln!(
      "{} is modified; overwriting.",
      path.display().if_supports_color(Stream::Stderr, |p| p.yellow())
    );
  }
}

/// Per-file failure, reported with the file path; the run continues.
pub fn print_file_error(path: &Path, error: &dyn std::fmt::Display) {
  eprintln!(
    "{} {}: {}",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    path.display(),
    error
  );
}

/// Prints the end-of-run summary.
pub fn print_summary(stats: &SyncStats, dry_run: bool) {
  if is_quiet() {
    return;
  }

  if stats.failures > 0 {
    println!(
      "{} {} of {} files failed",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      stats.failures,
      stats.candidates
    );
  }

  if stats.files_modified == 0 && stats.failures == 0 {
    println!(
      "{} All {} files already in sync",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      stats.candidates
    );
    return;
  }

  let verb = if dry_run { "need syncing" } else { "synced" };
  println!(
    "{} {} of {} files {} ({} missing headers)",
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
    stats.files_modified,
    stats.candidates,
    verb,
    stats.headers_added
  );
}
