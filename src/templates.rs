//! # Templates Module
//!
//! This module provides the fixed license banner and license text that the
//! header rewriter inserts into files without a header.
//!
//! The banner line (`This file is part of <project>`) doubles as the header's
//! presence marker: a file whose first post-prelude line is the token-prefixed
//! banner is considered to already carry a header.
//!
//! The license body defaults to the GPLv3 notice with `{{project}}`
//! substituted, and can be replaced by a custom template file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::verbose_log;

/// Default license notice body; `{{project}}` is replaced with the project
/// name at render time.
const DEFAULT_TEMPLATE: &str = "\
{{project}} is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

{{project}} is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with {{project}}.  If not, see <https://www.gnu.org/licenses/>.
";

/// The rendered banner and license text for one project.
#[derive(Debug, Clone)]
pub struct LicenseText {
  banner: String,
  lines: Vec<String>,
}

impl LicenseText {
  /// Renders the banner and license body for the given project using the
  /// built-in template.
  pub fn new(project: &str) -> Self {
    Self::from_template(project, DEFAULT_TEMPLATE)
  }

  /// Renders using a custom template body (same `{{project}}` substitution).
  pub fn from_template(project: &str, template: &str) -> Self {
    let rendered = template.replace("{{project}}", project);
    Self {
      banner: format!("This file is part of {project}"),
      lines: rendered.trim().lines().map(str::to_string).collect(),
    }
  }

  /// Loads a custom template from a file and renders it.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read.
  pub fn load(project: &str, path: &Path) -> Result<Self> {
    verbose_log!("Loading license template from: {}", path.display());

    let template =
      fs::read_to_string(path).with_context(|| format!("Failed to read license template file: {}", path.display()))?;

    Ok(Self::from_template(project, &template))
  }

  /// The single banner line, without any comment token.
  pub fn banner(&self) -> &str {
    &self.banner
  }

  /// The license body lines, without comment tokens. Blank lines inside the
  /// body are preserved as empty strings.
  pub fn lines(&self) -> &[String] {
    &self.lines
  }
}
