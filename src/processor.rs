//! # Processor Module
//!
//! This module drives header synchronization: for each eligible file it
//! derives the copyright years from git history, rewrites the header in
//! memory, and overwrites the file only when the result differs.
//!
//! Files are processed one at a time in enumeration order. File-scoped
//! errors ([`SyncError`]) are reported and counted without stopping the run;
//! git and filesystem failures are fatal since they indicate an environment
//! problem. A file is only ever written after its full in-memory reassembly
//! succeeded, so a failure never leaves a partial write behind.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;
use git2::{Oid, Repository};
use tracing::debug;

use crate::config::Config;
use crate::diff::DiffManager;
use crate::error::SyncError;
use crate::git;
use crate::header::HeaderRewriter;
use crate::output::{print_file_error, print_file_modified, print_header_added};
use crate::selector::{Candidate, PathRules, list_candidates};
use crate::templates::LicenseText;
use crate::years::YearSet;

/// Counters accumulated over one run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
  /// Eligible files considered.
  pub candidates: usize,
  /// Files that had no banner and received a full header.
  pub headers_added: usize,
  /// Files whose rewritten contents differed (written unless dry-run).
  pub files_modified: usize,
  /// Files that failed with a file-scoped error.
  pub failures: usize,
}

/// Outcome of synchronizing a single file.
enum FileSync {
  /// Already canonical; nothing to do.
  Clean,
  /// Contents changed; `header_added` when the banner had to be inserted.
  Modified { header_added: bool },
  /// File-scoped failure; the file on disk is untouched.
  Failed(SyncError),
}

/// Processor for synchronizing license headers across a repository.
pub struct Processor<'a> {
  config: &'a Config,
  rules: PathRules,
  license: LicenseText,
  dry_run: bool,
  diff: DiffManager,
}

impl<'a> Processor<'a> {
  /// Creates a processor from the loaded configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if an ignore glob fails to compile or the custom
  /// license template cannot be read.
  pub fn new(config: &'a Config, ignore_globs: &[String], dry_run: bool, diff: Option<DiffManager>) -> Result<Self> {
    let rules = PathRules::from_config(config, ignore_globs)?;

    let license = match &config.license_template {
      Some(path) => LicenseText::load(&config.project, path)?,
      None => LicenseText::new(&config.project),
    };

    Ok(Self {
      config,
      rules,
      license,
      dry_run,
      diff: diff.unwrap_or_else(|| DiffManager::new(false, None)),
    })
  }

  /// Enumerates the eligible files changed since `since`, in processing
  /// order.
  pub fn candidates(&self, repo: &Repository, since: Oid) -> Result<Vec<Candidate>> {
    list_candidates(repo, since, &self.rules)
  }

  /// Synchronizes every eligible file changed since `since`.
  ///
  /// # Errors
  ///
  /// Returns an error on git or filesystem failures; per-file data problems
  /// are reported and reflected in [`SyncStats::failures`] instead.
  pub fn run(&self, repo: &Repository, since: Oid) -> Result<SyncStats> {
    let candidates = self.candidates(repo, since)?;
    self.run_collected(repo, since, &candidates)
  }

  /// Synchronizes a pre-collected candidate list.
  ///
  /// Use this when the candidates were already enumerated (e.g. for the
  /// start message) to avoid repeating the git diff.
  pub fn run_collected(&self, repo: &Repository, since: Oid, candidates: &[Candidate]) -> Result<SyncStats> {
    let workdir = git::workdir(repo)?;
    debug!("Processing {} candidate files", candidates.len());

    let mut stats = SyncStats {
      candidates: candidates.len(),
      ..SyncStats::default()
    };

    for candidate in candidates {
      match self.sync_file(repo, &workdir, since, candidate)? {
        FileSync::Clean => {}
        FileSync::Modified { header_added } => {
          stats.files_modified += 1;
          if header_added {
            stats.headers_added += 1;
          }
        }
        FileSync::Failed(error) => {
          print_file_error(&candidate.path, &error);
          stats.failures += 1;
        }
      }
    }

    Ok(stats)
  }

  /// Synchronizes one file. `Err` is fatal (environment); data problems come
  /// back as [`FileSync::Failed`].
  fn sync_file(&self, repo: &Repository, workdir: &Path, since: Oid, candidate: &Candidate) -> Result<FileSync> {
    let years = self.holder_years(repo, since, &candidate.path)?;
    let full_path = workdir.join(&candidate.path);

    let content = std::fs::read_to_string(&full_path)
      .with_context(|| format!("Failed to read file: {}", full_path.display()))?;

    let rewriter = HeaderRewriter::new(&self.license, &self.config.holder);
    let outcome = match rewriter.rewrite(&content, candidate.kind, &years) {
      Ok(outcome) => outcome,
      Err(error) => return Ok(FileSync::Failed(error)),
    };

    if outcome.header_added {
      print_header_added(&candidate.path);
    }

    if !outcome.changed {
      debug!("{}: already in sync", candidate.path.display());
      return Ok(FileSync::Clean);
    }

    print_file_modified(&candidate.path, self.dry_run);

    if self.diff.is_active()
      && let Err(e) = self.diff.emit(&candidate.path, &content, &outcome.content)
    {
      eprintln!("Warning: Failed to render diff for {}: {}", candidate.path.display(), e);
    }

    if !self.dry_run {
      std::fs::write(&full_path, &outcome.content)
        .with_context(|| format!("Failed to write file: {}", full_path.display()))?;
    }

    Ok(FileSync::Modified {
      header_added: outcome.header_added,
    })
  }

  /// Years to attribute to the holder for one file. History can come back
  /// empty (the file only changed in ignored or pre-ancestor commits); a
  /// copyright line needs at least one year, so the current year stands in.
  fn holder_years(&self, repo: &Repository, since: Oid, path: &Path) -> Result<YearSet> {
    let mut years = git::years_for_file(repo, path, since, &self.config.ignored_commits)?;
    if years.is_empty() {
      let current = chrono::Local::now().year();
      debug!("{}: no history years; using {}", path.display(), current);
      years.insert(u16::try_from(current).context("Current year out of range")?);
    }
    Ok(years)
  }
}
