//! # Selector Module
//!
//! This module decides which changed files are eligible for header
//! synchronization: whitelist/blacklist path rules, CLI ignore globs, and
//! the extension-to-file-type table.
//!
//! Paths are matched repo-relative with `/` separators, anchored at both
//! ends, mirroring how the rules are written in the config file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{Oid, Repository};
use regex::Regex;
use tracing::trace;

use crate::comment::FileKind;
use crate::config::Config;
use crate::error::SyncError;
use crate::git;

/// A file selected for processing, with its detected type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  /// Path relative to the repository root.
  pub path: PathBuf,
  pub kind: FileKind,
}

/// Compiled path-selection rules.
pub struct PathRules {
  whitelist: Vec<Regex>,
  blacklist: Vec<Regex>,
  ignore: Vec<glob::Pattern>,
  file_types: HashMap<String, FileKind>,
}

impl PathRules {
  /// Compiles rules from the configuration plus any extra CLI ignore globs.
  ///
  /// # Errors
  ///
  /// Returns an error if a pattern fails to compile. Config patterns are
  /// pre-validated at load time, so in practice only CLI globs can fail
  /// here.
  pub fn from_config(config: &Config, ignore_globs: &[String]) -> Result<Self> {
    let compile = |patterns: &[String]| -> Result<Vec<Regex>> {
      patterns
        .iter()
        .map(|p| Regex::new(&format!("^{p}$")).with_context(|| format!("Invalid path pattern: {p}")))
        .collect()
    };

    let ignore = ignore_globs
      .iter()
      .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid ignore pattern: {p}")))
      .collect::<Result<Vec<_>>>()?;

    let mut file_types = HashMap::new();
    for (extension, tag) in &config.file_types {
      let kind = FileKind::from_tag(tag).with_context(|| format!("Invalid file type tag: {tag}"))?;
      file_types.insert(extension.to_lowercase(), kind);
    }

    Ok(Self {
      whitelist: compile(&config.whitelist)?,
      blacklist: compile(&config.blacklist)?,
      ignore,
      file_types,
    })
  }

  /// Whether a repo-relative path passes the whitelist, blacklist, and
  /// ignore-glob rules.
  pub fn is_allowed(&self, path: &Path) -> bool {
    let name = normalized(path);

    if !self.whitelist.iter().any(|re| re.is_match(&name)) {
      trace!("Skipping: {} (not whitelisted)", name);
      return false;
    }
    if self.blacklist.iter().any(|re| re.is_match(&name)) {
      trace!("Skipping: {} (blacklisted)", name);
      return false;
    }
    if self.ignore.iter().any(|pat| pat.matches(&name)) {
      trace!("Skipping: {} (matches ignore pattern)", name);
      return false;
    }

    true
  }

  /// Detects the file type from the file name, or `None` when the
  /// extension is not in the recognized-type table.
  ///
  /// A file named `CMakeLists.txt` is build configuration regardless of its
  /// extension, and a trailing `.in` template suffix is stripped before
  /// extension lookup.
  pub fn detect_kind(&self, path: &Path) -> Option<FileKind> {
    let basename = path.file_name()?.to_string_lossy().to_string();
    if basename.eq_ignore_ascii_case("cmakelists.txt") {
      return Some(FileKind::BuildConfig);
    }

    let mut parts: Vec<&str> = basename.split('.').collect();
    if parts.len() <= 1 {
      return None;
    }
    if parts.last().is_some_and(|ext| *ext == "in") {
      parts.pop();
    }
    if parts.len() <= 1 {
      return None;
    }

    parts.last().and_then(|ext| self.file_types.get(&ext.to_lowercase())).copied()
  }

  /// Like [`detect_kind`](Self::detect_kind), but unrecognized extensions
  /// are an error instead of a silent skip.
  pub fn classify(&self, path: &Path) -> Result<FileKind, SyncError> {
    self
      .detect_kind(path)
      .ok_or_else(|| SyncError::UnsupportedType(path.display().to_string()))
  }
}

/// Enumerates eligible files changed since the ancestor commit, sorted by
/// path for deterministic processing order.
pub fn list_candidates(repo: &Repository, since: Oid, rules: &PathRules) -> Result<Vec<Candidate>> {
  let workdir = git::workdir(repo)?;

  let mut candidates = Vec::new();
  for path in git::changed_files(repo, since)? {
    if !workdir.join(&path).is_file() {
      continue;
    }
    if !rules.is_allowed(&path) {
      continue;
    }
    let Some(kind) = rules.detect_kind(&path) else {
      trace!("Skipping: {} (unrecognized file type)", path.display());
      continue;
    };
    candidates.push(Candidate { path, kind });
  }

  candidates.sort_by(|a, b| a.path.cmp(&b.path));
  Ok(candidates)
}

fn normalized(path: &Path) -> String {
  let name = path.to_string_lossy();
  if std::path::MAIN_SEPARATOR == '/' {
    name.into_owned()
  } else {
    name.replace(std::path::MAIN_SEPARATOR, "/")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rules_for(whitelist: &[&str], blacklist: &[&str], ignore: &[&str]) -> PathRules {
    let mut config = Config::with_identity("p", "h");
    config.whitelist = whitelist.iter().map(|s| s.to_string()).collect();
    config.blacklist = blacklist.iter().map(|s| s.to_string()).collect();
    let ignore: Vec<String> = ignore.iter().map(|s| s.to_string()).collect();
    PathRules::from_config(&config, &ignore).unwrap()
  }

  #[test]
  fn whitelist_is_anchored() {
    let rules = rules_for(&["src/.*"], &[], &[]);
    assert!(rules.is_allowed(Path::new("src/main.cpp")));
    assert!(!rules.is_allowed(Path::new("other/src/main.cpp")));
    assert!(!rules.is_allowed(Path::new("README.md")));
  }

  #[test]
  fn blacklist_overrides_whitelist() {
    let rules = rules_for(&[".*"], &["vendor/.*"], &[]);
    assert!(rules.is_allowed(Path::new("src/main.cpp")));
    assert!(!rules.is_allowed(Path::new("vendor/lib.cpp")));
  }

  #[test]
  fn ignore_globs_from_cli() {
    let rules = rules_for(&[".*"], &[], &["**/*.gen.cpp"]);
    assert!(rules.is_allowed(Path::new("src/main.cpp")));
    assert!(!rules.is_allowed(Path::new("src/gen/tables.gen.cpp")));
  }

  #[test]
  fn detect_kind_by_extension() {
    let rules = rules_for(&[".*"], &[], &[]);
    assert_eq!(rules.detect_kind(Path::new("src/board.cpp")), Some(FileKind::Cpp));
    assert_eq!(rules.detect_kind(Path::new("src/board.h")), Some(FileKind::Cpp));
    assert_eq!(rules.detect_kind(Path::new("tools/gen.py")), Some(FileKind::Python));
    assert_eq!(rules.detect_kind(Path::new("ci/build.sh")), Some(FileKind::Shell));
    assert_eq!(rules.detect_kind(Path::new("cmake/deps.cmake")), Some(FileKind::BuildConfig));
  }

  #[test]
  fn cmakelists_special_case() {
    let rules = rules_for(&[".*"], &[], &[]);
    assert_eq!(rules.detect_kind(Path::new("CMakeLists.txt")), Some(FileKind::BuildConfig));
    assert_eq!(
      rules.detect_kind(Path::new("src/cmakelists.TXT")),
      Some(FileKind::BuildConfig)
    );
  }

  #[test]
  fn template_suffix_is_stripped() {
    let rules = rules_for(&[".*"], &[], &[]);
    assert_eq!(rules.detect_kind(Path::new("src/version.h.in")), Some(FileKind::Cpp));
    // Stripping `.in` must still leave a real extension behind.
    assert_eq!(rules.detect_kind(Path::new("config.in")), None);
  }

  #[test]
  fn unrecognized_extensions_are_skipped() {
    let rules = rules_for(&[".*"], &[], &[]);
    assert_eq!(rules.detect_kind(Path::new("README.md")), None);
    assert_eq!(rules.detect_kind(Path::new("Makefile")), None);
    assert!(matches!(
      rules.classify(Path::new("README.md")),
      Err(SyncError::UnsupportedType(_))
    ));
  }
}
