//! # Comment Style Module
//!
//! Maps recognized file types to their line-comment token. The header
//! rewriter only deals in line comments; block-comment languages are outside
//! the recognized-type table.

use std::fmt;

use crate::error::SyncError;

/// A recognized source file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
  /// C/C++ sources and headers.
  Cpp,
  /// Python scripts.
  Python,
  /// Shell scripts.
  Shell,
  /// CMake lists and other build configuration.
  BuildConfig,
}

impl FileKind {
  /// The line-comment token for this file type, without trailing space.
  pub const fn comment_token(self) -> &'static str {
    match self {
      Self::Cpp => "//",
      Self::Python | Self::Shell | Self::BuildConfig => "#",
    }
  }

  /// Resolves a configuration tag (as used in the file-type table) to a
  /// file kind.
  ///
  /// # Errors
  ///
  /// Returns [`SyncError::UnsupportedType`] for unrecognized tags. Callers
  /// pre-filter paths through the recognized-extension table, so in normal
  /// operation this never fires.
  pub fn from_tag(tag: &str) -> Result<Self, SyncError> {
    match tag {
      "cpp" => Ok(Self::Cpp),
      "python" | "py" => Ok(Self::Python),
      "shell" | "sh" => Ok(Self::Shell),
      "build-config" | "cmake" => Ok(Self::BuildConfig),
      other => Err(SyncError::UnsupportedType(other.to_string())),
    }
  }
}

impl fmt::Display for FileKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Cpp => "cpp",
      Self::Python => "python",
      Self::Shell => "shell",
      Self::BuildConfig => "build-config",
    };
    f.write_str(name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn comment_tokens() {
    assert_eq!(FileKind::Cpp.comment_token(), "//");
    assert_eq!(FileKind::Python.comment_token(), "#");
    assert_eq!(FileKind::Shell.comment_token(), "#");
    assert_eq!(FileKind::BuildConfig.comment_token(), "#");
  }

  #[test]
  fn from_tag_resolves_known_tags() {
    assert_eq!(FileKind::from_tag("cpp").unwrap(), FileKind::Cpp);
    assert_eq!(FileKind::from_tag("py").unwrap(), FileKind::Python);
    assert_eq!(FileKind::from_tag("cmake").unwrap(), FileKind::BuildConfig);
  }

  #[test]
  fn from_tag_rejects_unknown_tags() {
    assert!(matches!(
      FileKind::from_tag("haskell"),
      Err(SyncError::UnsupportedType(_))
    ));
  }
}
