#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Checks if git is available on the system.
pub fn is_git_available() -> bool {
  Command::new("git").arg("--version").status().is_ok()
}

/// Runs a git command in the given directory, returning an error with stderr
/// on failure. Extra environment variables apply to this invocation only.
pub fn run_git_env(dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Result<()> {
  let mut command = Command::new("git");
  command.args(args).current_dir(dir);
  for (key, value) in env {
    command.env(key, value);
  }

  let output = command
    .output()
    .with_context(|| format!("Failed to execute git {args:?}"))?;

  if !output.status.success() {
    anyhow::bail!("git {:?} failed: {}", args, String::from_utf8_lossy(&output.stderr));
  }
  Ok(())
}

/// Runs a git command in the given directory.
pub fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
  run_git_env(dir, args, &[])
}

/// Initializes a git repository in the given directory with deterministic
/// settings.
///
/// Configures:
/// - Default branch name set to `main`
/// - User name and email for commits
/// - Disables commit signing for test isolation
pub fn init_git_repo(dir: &Path) -> Result<()> {
  run_git(dir, &["init"])?;
  run_git(dir, &["config", "init.defaultBranch", "main"])?;
  run_git(dir, &["branch", "-M", "main"])?;
  run_git(dir, &["config", "user.name", "Test User"])?;
  run_git(dir, &["config", "user.email", "test@example.com"])?;
  // Disable commit signing for test isolation
  run_git(dir, &["config", "commit.gpgsign", "false"])?;
  Ok(())
}

/// Creates a commit with a fixed author and committer date, so the years
/// derived from history are deterministic. `date` is any format git accepts,
/// e.g. `2021-06-15T12:00:00 +0000`.
pub fn git_commit_dated(dir: &Path, message: &str, date: &str) -> Result<()> {
  run_git_env(
    dir,
    &["commit", "-m", message],
    &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
  )
}

/// Stages a file and commits it with a fixed date.
pub fn git_add_and_commit_dated(dir: &Path, file: &str, message: &str, date: &str) -> Result<()> {
  run_git(dir, &["add", file])?;
  git_commit_dated(dir, message, date)
}
