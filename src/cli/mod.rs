//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing and supports subcommands for
//! extensibility.

mod sync;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
pub use sync::{SyncArgs, run_sync};

/// Version string for `--version`: the crate version, plus the commit hash
/// and date embedded by the build script when the binary was built inside a
/// git checkout.
fn build_version() -> String {
  match option_env!("GIT_HASH") {
    Some(hash) if !hash.is_empty() => {
      let date = option_env!("GIT_DATE").unwrap_or("unknown");
      format!("{} ({hash} {date})", env!("CARGO_PKG_VERSION"))
    }
    _ => env!("CARGO_PKG_VERSION").to_string(),
  }
}

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version = build_version(),
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Sync headers for everything changed since the first commit
  licsync

  # Consider only changes after a given commit
  licsync --from v1.2.0

  # Check without modifying, showing what would change
  licsync --dry-run --show-diff

  # Provide identity on the command line instead of .licsync.toml
  licsync --project SoFCheck --holder \"Jane Doe and SoFCheck contributors\"

  # Ignore generated files
  licsync --ignore \"**/*.gen.cpp\" --ignore \"third_party/**\"
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub sync_args: SyncArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Synchronize license headers and copyright years (default)
  Sync(SyncArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Get the effective sync arguments, whether from a subcommand or top-level
  pub fn get_sync_args(self) -> SyncArgs {
    match self.command {
      Some(Command::Sync(args)) => args,
      None => self.sync_args,
    }
  }
}
