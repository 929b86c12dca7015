//! # Logging Module
//!
//! This module provides logging utilities for the licsync tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Structured tracing output for debugging
//!
//! Per-file diagnostics and verbose logs go to stderr so stdout stays
//! predictable for pipeline integration.

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose
/// mode is enabled via [`set_verbose`]. It uses the same format string syntax
/// as the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}
