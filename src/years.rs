//! # Year Set Module
//!
//! This module implements the year-set algebra used by copyright lines:
//! parsing free-form year/range expressions into a canonical set of years,
//! and re-compressing a set of years into a minimal sequence of single years
//! and hyphenated ranges.
//!
//! `render(parse(x))` normalizes (deduplicates, reorders, merges adjacent
//! ranges), but `parse(render(s)) == s` holds for every valid set.

use std::collections::BTreeSet;

use crate::error::SyncError;

/// No copyright year can predate this. Used as a sanity floor when parsing.
pub const YEAR_FLOOR: u16 = 1970;

/// Maximum span a single hyphenated range may cover.
const MAX_RANGE_SPAN: u16 = 1000;

/// A set of copyright years.
///
/// Stored as a `BTreeSet` so iteration is always ascending, which makes
/// rendering a single linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSet(BTreeSet<u16>);

impl YearSet {
  /// Creates an empty year set.
  pub const fn new() -> Self {
    Self(BTreeSet::new())
  }

  /// Inserts a single year.
  pub fn insert(&mut self, year: u16) {
    self.0.insert(year);
  }

  /// Unions another set into this one.
  pub fn merge(&mut self, other: &YearSet) {
    self.0.extend(other.0.iter().copied());
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Parses a textual year expression into a year set.
  ///
  /// The expression is a comma-separated list of items; each trimmed item is
  /// either a bare year (`"2021"`) or a hyphenated range (`"2019-2021"`).
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::Format`] if an item is neither shape, if a range is
  /// reversed, if a range spans more than 1000 years, or if any year is
  /// before 1970.
  pub fn parse(text: &str) -> Result<Self, SyncError> {
    let mut years = BTreeSet::new();

    for item in text.split(',') {
      let item = item.trim();
      match item.split_once('-') {
        None => {
          let year = parse_year(item)?;
          years.insert(year);
        }
        Some((left, right)) => {
          let left = parse_year(left.trim())?;
          let right = parse_year(right.trim())?;
          if right < left || right - left > MAX_RANGE_SPAN {
            return Err(SyncError::Format(format!("invalid range '{item}'")));
          }
          years.extend(left..=right);
        }
      }
    }

    Ok(Self(years))
  }

  /// Renders the set in canonical form: ascending years grouped into maximal
  /// runs of consecutive integers, single years as `"Y"`, longer runs as
  /// `"Yfirst-Ylast"`, groups joined by `", "`.
  pub fn render(&self) -> String {
    let years: Vec<u16> = self.0.iter().copied().collect();
    let mut groups = Vec::new();

    let mut right = 0;
    while right < years.len() {
      let left = right;
      // A run extends while each year is consecutive with the run start.
      while right < years.len() && years[right] == years[left] + (right - left) as u16 {
        right += 1;
      }
      if left + 1 == right {
        groups.push(years[left].to_string());
      } else {
        groups.push(format!("{}-{}", years[left], years[right - 1]));
      }
    }

    groups.join(", ")
  }

}

impl FromIterator<u16> for YearSet {
  fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

fn parse_year(item: &str) -> Result<u16, SyncError> {
  let year: u16 = item
    .parse()
    .map_err(|_| SyncError::Format(format!("invalid year '{item}'")))?;
  if year < YEAR_FLOOR {
    return Err(SyncError::Format(format!("year {year} predates {YEAR_FLOOR}")));
  }
  Ok(year)
}
