//! # Diff Module
//!
//! Renders unified-style diffs between a file's current contents and the
//! rewritten header, for dry-run inspection. Diffs go to stderr so stdout
//! stays scriptable; with `--save-diff` every file's diff is appended to one
//! consolidated file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for header changes in dry-run mode.
pub struct DiffManager {
  /// Whether to print diffs to stderr.
  pub show_diff: bool,

  /// Path to append diffs to, if any.
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_active(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Renders the line diff between `original` and `new` for `path`,
  /// printing and/or appending it per configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if the diff file cannot be opened or written.
  pub fn emit(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let rendered = render_diff(path, original, new);

    if self.show_diff {
      eprint!("{rendered}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);

  let mut out = format!("Diff for {}:\n", path.display());
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    out.push_str(sign);
    out.push_str(change.value());
  }
  out.push('\n');
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn render_marks_inserted_lines() {
    let rendered = render_diff(Path::new("a.cpp"), "int x;\n", "// header\nint x;\n");
    assert!(rendered.starts_with("Diff for a.cpp:\n"));
    assert!(rendered.contains("+// header\n"));
    assert!(rendered.contains(" int x;\n"));
  }

  #[test]
  fn inactive_manager_emits_nothing() {
    let manager = DiffManager::new(false, None);
    assert!(!manager.is_active());
    // emit with no sinks is a no-op and must not fail
    manager.emit(Path::new("a.cpp"), "a\n", "b\n").unwrap();
  }
}
