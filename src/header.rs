//! # Header Module
//!
//! The header parsing/rewriting state machine. Given a file's contents, a
//! comment token, and the set of years to attribute to the project's
//! copyright holder, it:
//!
//! 1. skips the prelude (shebang lines, preserved verbatim);
//! 2. inserts the banner and license text when the banner is absent;
//! 3. attributes the supplied years to the holder, heading the region;
//! 4. scans the copyright region into a [`CopyrightRegistry`], merging a
//!    pre-existing holder line into the seeded entry;
//! 5. re-renders the region in canonical form and reassembles the file.
//!
//! The whole pass is idempotent: running it again on its own output with the
//! same year set reproduces the output byte for byte. Nothing is written
//! here; the caller compares [`RewriteOutcome::changed`] and performs I/O.

use crate::comment::FileKind;
use crate::copyright::{CopyrightLine, CopyrightRegistry};
use crate::error::SyncError;
use crate::templates::LicenseText;
use crate::years::YearSet;

/// Result of one in-memory rewrite pass.
#[derive(Debug)]
pub struct RewriteOutcome {
  /// The reassembled file contents, ending in a newline.
  pub content: String,

  /// Whether the banner and license text had to be inserted.
  pub header_added: bool,

  /// Whether the reassembled contents differ from the input. When `false`
  /// the caller must not touch the file.
  pub changed: bool,
}

/// Rewrites license headers for one project's banner, license text, and
/// copyright holder.
pub struct HeaderRewriter<'a> {
  license: &'a LicenseText,
  holder: &'a str,
}

impl<'a> HeaderRewriter<'a> {
  pub const fn new(license: &'a LicenseText, holder: &'a str) -> Self {
    Self { license, holder }
  }

  /// Runs the rewrite pass over `content`.
  ///
  /// `years` is attributed to the holder before the region is scanned, so
  /// the holder's line renders first in a freshly built region; a
  /// pre-existing holder line merges into it.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::MalformedHeader`] when the copyright region never
  /// terminates (a non-comment line or end of file is reached before a
  /// comment line that is not a copyright line), and [`SyncError::Format`]
  /// when an existing copyright line carries a malformed year expression.
  pub fn rewrite(&self, content: &str, kind: FileKind, years: &YearSet) -> Result<RewriteOutcome, SyncError> {
    let token = kind.comment_token();
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    // Prelude: interpreter directives stay at the very top, verbatim.
    let mut pos = 0;
    while pos < lines.len() && is_prelude(&lines[pos]) {
      pos += 1;
    }

    // Banner detection. An absent banner means the whole header is absent:
    // splice banner + license text after the prelude, consuming any blank
    // lines that separated the prelude from the old first content line.
    let banner_line = format!("{token} {}", self.license.banner());
    let header_added = pos >= lines.len() || lines[pos] != banner_line;
    if header_added {
      let mut block = Vec::with_capacity(self.license.lines().len() + 3);
      block.push(self.license.banner().to_string());
      block.push(String::new());
      block.extend(self.license.lines().iter().cloned());

      let mut nonempty = pos;
      while nonempty < lines.len() && lines[nonempty].is_empty() {
        nonempty += 1;
      }

      let tail = lines.split_off(nonempty);
      lines.truncate(pos);
      lines.extend(block.iter().map(|l| format!("{token} {l}").trim_end().to_string()));
      lines.push(String::new());
      lines.extend(tail);
    }
    pos += 1;

    // Copyright-region scan: bare-token lines are separators, comment lines
    // are parsed until the first one that is not a copyright line; that line
    // (the start of the license text or file body) is not part of the
    // region, so the cursor rewinds past it.
    let region_start = pos;
    // The holder is attributed up front, so its line leads the region;
    // scanned entries for the same author merge into it.
    let mut registry = CopyrightRegistry::new();
    registry.add(CopyrightLine::new(self.holder.to_string(), years.clone()));
    let comment_prefix = format!("{token} ");
    loop {
      if pos >= lines.len() {
        return Err(SyncError::MalformedHeader);
      }
      let line = lines[pos].trim();
      pos += 1;
      if line == token {
        continue;
      }
      let Some(rest) = line.strip_prefix(&comment_prefix) else {
        return Err(SyncError::MalformedHeader);
      };
      match CopyrightLine::parse(rest)? {
        Some(entry) => registry.add(entry),
        None => {
          pos -= 1;
          break;
        }
      }
    }

    // Re-render the region between bare-token separator lines.
    let tail = lines.split_off(pos);
    lines.truncate(region_start);
    lines.push(token.to_string());
    lines.extend(registry.entries().iter().map(|entry| format!("{token} {entry}")));
    lines.push(token.to_string());
    lines.extend(tail);

    let mut rebuilt = lines.join("\n");
    rebuilt.push('\n');

    let changed = rebuilt != content;
    Ok(RewriteOutcome {
      content: rebuilt,
      header_added,
      changed,
    })
  }
}

/// Lines that must precede the header and are never reordered.
fn is_prelude(line: &str) -> bool {
  line.starts_with("#!")
}
