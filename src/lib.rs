//! # licsync
//!
//! A tool that keeps license headers and git-derived copyright years in sync
//! across a repository's tracked source files.
//!
//! `licsync` inspects the files git reports as changed since a base commit,
//! derives the copyright years for each file from its commit history, and
//! rewrites the license header in place so the copyright region reflects that
//! history. Files that already match are left untouched.
//!
//! ## Features
//!
//! * Git-driven file enumeration - only files changed since a base commit are inspected
//! * Copyright years derived from each file's actual commit history
//! * Year sets rendered compactly as comma-separated runs (`2019-2021, 2024`)
//! * Third-party copyright lines are preserved in their original order
//! * Dry-run mode that reports out-of-sync files without modifying them
//! * Unified diff output for every rewrite, on screen or saved to a file
//!
//! ## Usage as a Library
//!
//! This crate can be used as a library in your Rust projects:
//!
//! ```rust,no_run
//! use licsync::comment::FileKind;
//! use licsync::header::HeaderRewriter;
//! use licsync::templates::LicenseText;
//! use licsync::years::YearSet;
//!
//! fn main() -> anyhow::Result<()> {
//!     let license = LicenseText::new("my-project");
//!     let rewriter = HeaderRewriter::new(&license, "Example Author");
//!
//!     let years: YearSet = [2023u16, 2024].into_iter().collect();
//!     let outcome = rewriter.rewrite("int main() {}\n", FileKind::Cpp, &years)?;
//!     assert!(outcome.header_added);
//!     Ok(())
//! }
//! ```

pub mod comment;
pub mod config;
pub mod copyright;
pub mod diff;
pub mod error;
pub mod git;
pub mod header;
pub mod logging;
pub mod output;
pub mod processor;
pub mod selector;
pub mod templates;
pub mod years;
