//! # licsync
//!
//! A tool that keeps license headers and git-derived copyright years in sync
//! across a repository's tracked source files.

mod cli;
mod comment;
mod config;
mod copyright;
mod diff;
mod error;
mod git;
mod header;
mod logging;
mod output;
mod processor;
mod selector;
mod templates;
mod years;

use anyhow::Result;

use crate::cli::{Cli, run_sync};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_sync(cli.get_sync_args())
}
