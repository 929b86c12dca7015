//! # Git Module
//!
//! This module contains functionality for interacting with git repositories:
//! discovering the repository, resolving the ancestor commit to diff from,
//! listing files changed since that ancestor, and deriving the set of years
//! in which commits touched a given file.
//!
//! Any failure here is treated as fatal to the whole run: a broken repository
//! is an environment problem, not a data problem in one file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};
use git2::{Commit, Delta, DiffFindOptions, Oid, Repository};
use tracing::debug;

use crate::verbose_log;
use crate::years::YearSet;

/// Opens the repository containing `start`, walking up parent directories.
pub fn discover_repo(start: &Path) -> Result<Repository> {
  Repository::discover(start).with_context(|| format!("Failed to locate a git repository from {}", start.display()))
}

/// The repository's working directory root.
pub fn workdir(repo: &Repository) -> Result<PathBuf> {
  repo
    .workdir()
    .map(Path::to_path_buf)
    .context("Repository has no working directory (bare repository)")
}

/// Resolves a revision spec (branch, tag, or commit hash) to a commit id.
pub fn resolve_commit(repo: &Repository, spec: &str) -> Result<Oid> {
  let object = repo
    .revparse_single(spec)
    .with_context(|| format!("Failed to find git reference: {spec}"))?;
  let commit = object
    .peel_to_commit()
    .with_context(|| format!("Failed to get commit for reference: {spec}"))?;
  Ok(commit.id())
}

/// Finds the repository's very first commit (the root of the history reached
/// from HEAD). Used as the default ancestor when `--from` is not given.
pub fn first_commit(repo: &Repository) -> Result<Oid> {
  let mut revwalk = repo.revwalk().context("Failed to start revision walk")?;
  revwalk.push_head().context("Failed to push HEAD onto revision walk")?;

  let mut last = None;
  for oid in revwalk {
    last = Some(oid.context("Failed to walk revision history")?);
  }
  last.context("Repository has no commits")
}

/// Lists paths changed between the ancestor commit's tree and the working
/// directory (including staged changes), relative to the repository root.
pub fn changed_files(repo: &Repository, since: Oid) -> Result<Vec<PathBuf>> {
  verbose_log!("Listing files changed since {}", since);

  let commit = repo
    .find_commit(since)
    .with_context(|| format!("Failed to find commit {since}"))?;
  let tree = commit.tree().context("Failed to get tree for ancestor commit")?;

  let diff = repo
    .diff_tree_to_workdir_with_index(Some(&tree), None)
    .context("Failed to diff ancestor tree against working directory")?;

  let mut files = Vec::new();
  diff
    .foreach(
      &mut |delta, _| {
        if let Some(path) = delta.new_file().path() {
          files.push(path.to_path_buf());
        }
        true
      },
      None,
      None,
      None,
    )
    .context("Failed to process diff")?;

  debug!("Found {} changed files", files.len());
  Ok(files)
}

/// Derives the set of years in which non-ignored commits touched `path`.
///
/// Walks history from HEAD, hiding everything reachable from `since`; a
/// commit contributes its author's year when its tree differs from its first
/// parent's tree at the file's path (root commits diff against the empty
/// tree). Renames are followed: when a commit renamed the file, older
/// commits are checked against the previous name. Commit ids in `ignored`
/// are skipped entirely.
///
/// The year comes from the commit's timestamp interpreted in the author's
/// recorded offset, never from formatted date text.
pub fn years_for_file(repo: &Repository, path: &Path, since: Oid, ignored: &HashSet<String>) -> Result<YearSet> {
  let mut revwalk = repo.revwalk().context("Failed to start revision walk")?;
  revwalk.push_head().context("Failed to push HEAD onto revision walk")?;
  // Children before parents, so rename tracking moves backwards in time.
  revwalk
    .set_sorting(git2::Sort::TOPOLOGICAL)
    .context("Failed to sort revision walk")?;
  // The ancestor itself and everything before it stay out of the year set.
  revwalk
    .hide(since)
    .with_context(|| format!("Failed to hide commit {since}"))?;

  let mut years = YearSet::new();
  let mut current = path.to_path_buf();
  for oid in revwalk {
    let oid = oid.context("Failed to walk revision history")?;
    if ignored.contains(&oid.to_string()) {
      continue;
    }

    let commit = repo.find_commit(oid).with_context(|| format!("Failed to find commit {oid}"))?;
    if commit_touches_path(repo, &commit, &mut current)? {
      years.insert(commit_year(&commit)?);
    }
  }

  verbose_log!("{}: years from history: {}", path.display(), years.render());
  Ok(years)
}

/// Whether the commit changed `current` relative to its first parent (or the
/// empty tree for a root commit). When the change was a rename, `current` is
/// rewritten to the pre-rename path so earlier commits are matched against
/// the old name.
fn commit_touches_path(repo: &Repository, commit: &Commit<'_>, current: &mut PathBuf) -> Result<bool> {
  let tree = commit.tree().context("Failed to get commit tree")?;
  let parent_tree = match commit.parent(0) {
    Ok(parent) => Some(parent.tree().context("Failed to get parent tree")?),
    Err(_) => None,
  };

  let mut diff = repo
    .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
    .context("Failed to diff commit against parent")?;
  let mut find = DiffFindOptions::new();
  find.renames(true);
  diff.find_similar(Some(&mut find)).context("Failed to detect renames")?;

  for delta in diff.deltas() {
    if delta.new_file().path() != Some(current.as_path()) {
      continue;
    }
    if delta.status() == Delta::Renamed
      && let Some(old) = delta.old_file().path()
    {
      *current = old.to_path_buf();
    }
    return Ok(true);
  }
  Ok(false)
}

/// The author-local calendar year of a commit.
fn commit_year(commit: &Commit<'_>) -> Result<u16> {
  let when = commit.author().when();
  let offset = FixedOffset::east_opt(when.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
  let timestamp: DateTime<FixedOffset> = DateTime::from_timestamp(when.seconds(), 0)
    .context("Commit timestamp out of range")?
    .with_timezone(&offset);
  u16::try_from(timestamp.year()).context("Commit year out of range")
}
