//! # Error Module
//!
//! File-scoped error kinds for header synchronization. These abort processing
//! of a single file and are reported with the file path; they never abort the
//! overall run. Environment failures (git, filesystem) use `anyhow` at the
//! call site instead and are fatal.

/// Errors that can occur while parsing or rewriting a single file's header.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
  /// Malformed year/range text in a copyright line.
  #[error("invalid year expression: {0}")]
  Format(String),

  /// A copyright region is present but never terminates before end of file,
  /// or contains a non-comment line before a terminating one.
  #[error("bad license header: copyright region does not terminate")]
  MalformedHeader,

  /// A comment style was requested for an unrecognized file type. Callers
  /// pre-filter by recognized extensions, so this indicates a logic error
  /// upstream rather than bad file content.
  #[error("no comment style known for file type '{0}'")]
  UnsupportedType(String),
}
