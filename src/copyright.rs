//! # Copyright Module
//!
//! This module models individual copyright lines and the ordered registry
//! that merges them by author.
//!
//! Parsing a copyright line is deliberately non-failing for lines that simply
//! do not look like copyright lines: during header scanning a non-matching
//! line is the expected end-of-region marker, so [`CopyrightLine::parse`]
//! distinguishes "no match" (`Ok(None)`) from a line that matches the shape
//! but carries a malformed year expression (`Err`).

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SyncError;
use crate::years::YearSet;

/// Structural pattern for a copyright line: symbol, year expression, author.
static COPYRIGHT_LINE: LazyLock<Regex> = LazyLock::new(|| {
  #[allow(clippy::unwrap_used)] // pattern is a compile-time constant
  Regex::new(r"^\s*Copyright \(([Cc])\) ([-,0-9 ]+) (.*)$").unwrap()
});

/// One author's copyright attribution: author identity, year set, and the
/// copyright symbol as it appeared (`c` or `C`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightLine {
  /// Author text, compared exactly (case-sensitive) for identity.
  pub author: String,

  /// Years attributed to this author. Never empty on a constructed line.
  pub years: YearSet,

  /// The symbol inside the parentheses; the first-seen symbol for an author
  /// wins on merge.
  pub symbol: char,
}

impl CopyrightLine {
  /// Creates a fresh attribution with the lowercase symbol.
  pub const fn new(author: String, years: YearSet) -> Self {
    Self {
      author,
      years,
      symbol: 'c',
    }
  }

  /// Parses a single stripped line as a copyright line.
  ///
  /// Returns `Ok(None)` when the line does not match the copyright shape at
  /// all; header scanning uses this to detect the end of the copyright
  /// region, so a non-match is a valid, expected outcome.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::Format`] when the line matches the shape but its
  /// year expression is malformed.
  pub fn parse(line: &str) -> Result<Option<Self>, SyncError> {
    let Some(caps) = COPYRIGHT_LINE.captures(line) else {
      return Ok(None);
    };

    let symbol = caps[1].chars().next().unwrap_or('c');
    let years = YearSet::parse(&caps[2])?;
    let author = caps[3].to_string();

    Ok(Some(Self { author, years, symbol }))
  }

  /// Unions another year set into this line's years.
  pub fn merge_years(&mut self, other: &YearSet) {
    self.years.merge(other);
  }
}

impl fmt::Display for CopyrightLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Copyright ({}) {} {}", self.symbol, self.years.render(), self.author)
  }
}

/// An insertion-ordered collection of copyright lines keyed by author.
///
/// Implemented as a vector of entries plus an explicit author-to-index
/// ledger, so ordering never depends on map iteration order. Inserting a
/// line for an author already present unions the year sets instead of
/// duplicating the entry; entries are never removed within a run.
#[derive(Debug, Default)]
pub struct CopyrightRegistry {
  entries: Vec<CopyrightLine>,
  index: HashMap<String, usize>,
}

impl CopyrightRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a line, merging years into the existing entry when the author is
  /// already present (the existing entry's symbol is kept), or appending in
  /// arrival order otherwise.
  pub fn add(&mut self, line: CopyrightLine) {
    if let Some(&pos) = self.index.get(&line.author) {
      self.entries[pos].merge_years(&line.years);
      return;
    }
    self.index.insert(line.author.clone(), self.entries.len());
    self.entries.push(line);
  }

  /// Entries in first-seen order, for final rendering.
  pub fn entries(&self) -> &[CopyrightLine] {
    &self.entries
  }
}
