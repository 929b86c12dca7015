mod common;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use common::{git_add_and_commit_dated, init_git_repo, is_git_available};
use licsync::config::Config;
use licsync::git;
use licsync::processor::Processor;
use tempfile::{TempDir, tempdir};

/// Initializes a temp repository with a dated root commit containing a
/// placeholder file (so later commits diff against something).
fn init_temp_git_repo() -> Result<TempDir> {
  let temp_dir = tempdir()?;
  init_git_repo(temp_dir.path())?;

  fs::write(temp_dir.path().join("README.md"), "placeholder\n")?;
  git_add_and_commit_dated(temp_dir.path(), "README.md", "Initial commit", "2019-06-15T12:00:00 +0000")?;

  Ok(temp_dir)
}

fn test_config() -> Config {
  Config::with_identity("demo", "Example Author")
}

#[test]
fn adds_header_with_years_from_history() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = init_temp_git_repo()?;
  fs::write(temp_dir.path().join("engine.cpp"), "int a;\n")?;
  git_add_and_commit_dated(temp_dir.path(), "engine.cpp", "Add engine", "2021-03-04T12:00:00 +0000")?;

  let repo = git::discover_repo(temp_dir.path())?;
  let root = git::first_commit(&repo)?;

  let config = test_config();
  let processor = Processor::new(&config, &[], false, None)?;
  let stats = processor.run(&repo, root)?;

  assert_eq!(stats.candidates, 1);
  assert_eq!(stats.headers_added, 1);
  assert_eq!(stats.files_modified, 1);
  assert_eq!(stats.failures, 0);

  let content = fs::read_to_string(temp_dir.path().join("engine.cpp"))?;
  assert!(content.starts_with(
    "// This file is part of demo\n\
     //\n\
     // Copyright (c) 2021 Example Author\n\
     //\n\
     // demo is free software"
  ));
  assert!(content.ends_with("\n\nint a;\n"));
  Ok(())
}

#[test]
fn a_second_run_changes_nothing() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = init_temp_git_repo()?;
  fs::write(temp_dir.path().join("engine.cpp"), "int a;\n")?;
  git_add_and_commit_dated(temp_dir.path(), "engine.cpp", "Add engine", "2021-03-04T12:00:00 +0000")?;

  let repo = git::discover_repo(temp_dir.path())?;
  let root = git::first_commit(&repo)?;

  let config = test_config();
  let processor = Processor::new(&config, &[], false, None)?;
  processor.run(&repo, root)?;

  let after_first = fs::read_to_string(temp_dir.path().join("engine.cpp"))?;
  let stats = processor.run(&repo, root)?;

  assert_eq!(stats.files_modified, 0);
  assert_eq!(stats.failures, 0);
  assert_eq!(fs::read_to_string(temp_dir.path().join("engine.cpp"))?, after_first);
  Ok(())
}

#[test]
fn dry_run_reports_without_writing() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = init_temp_git_repo()?;
  let original = "def main():\n    pass\n";
  fs::write(temp_dir.path().join("tool.py"), original)?;
  git_add_and_commit_dated(temp_dir.path(), "tool.py", "Add tool", "2022-05-01T12:00:00 +0000")?;

  let repo = git::discover_repo(temp_dir.path())?;
  let root = git::first_commit(&repo)?;

  let config = test_config();
  let processor = Processor::new(&config, &[], true, None)?;
  let stats = processor.run(&repo, root)?;

  assert_eq!(stats.files_modified, 1);
  assert_eq!(stats.headers_added, 1);
  assert_eq!(fs::read_to_string(temp_dir.path().join("tool.py"))?, original);
  Ok(())
}

#[test]
fn malformed_header_is_counted_and_the_file_is_untouched() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = init_temp_git_repo()?;
  // Banner followed by an unterminated copyright region.
  let broken = "// This file is part of demo\n//\n";
  fs::write(temp_dir.path().join("broken.cpp"), broken)?;
  git_add_and_commit_dated(temp_dir.path(), "broken.cpp", "Add broken", "2021-03-04T12:00:00 +0000")?;

  let repo = git::discover_repo(temp_dir.path())?;
  let root = git::first_commit(&repo)?;

  let config = test_config();
  let processor = Processor::new(&config, &[], false, None)?;
  let stats = processor.run(&repo, root)?;

  assert_eq!(stats.failures, 1);
  assert_eq!(stats.files_modified, 0);
  assert_eq!(fs::read_to_string(temp_dir.path().join("broken.cpp"))?, broken);
  Ok(())
}

#[test]
fn blacklist_and_ignore_globs_exclude_candidates() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = init_temp_git_repo()?;
  fs::create_dir_all(temp_dir.path().join("vendor"))?;
  fs::write(temp_dir.path().join("vendor/external.cpp"), "int v;\n")?;
  fs::write(temp_dir.path().join("gen.cpp"), "int g;\n")?;
  fs::write(temp_dir.path().join("engine.cpp"), "int a;\n")?;
  common::run_git(temp_dir.path(), &["add", "."])?;
  common::git_commit_dated(temp_dir.path(), "Add sources", "2021-03-04T12:00:00 +0000")?;

  let repo = git::discover_repo(temp_dir.path())?;
  let root = git::first_commit(&repo)?;

  let mut config = test_config();
  config.blacklist = vec!["vendor/.*".to_string()];

  let processor = Processor::new(&config, &["gen.*".to_string()], false, None)?;
  let candidates = processor.candidates(&repo, root)?;
  let paths: Vec<PathBuf> = candidates.into_iter().map(|c| c.path).collect();

  assert_eq!(paths, [PathBuf::from("engine.cpp")]);
  Ok(())
}

#[test]
fn existing_third_party_lines_survive_a_sync() -> Result<()> {
  if !is_git_available() {
    println!("Skipping git test because git command is not available");
    return Ok(());
  }

  let temp_dir = init_temp_git_repo()?;
  let content = "\
// This file is part of demo
//
// Copyright (c) 2015 Upstream Project
// Copyright (c) 2020 Example Author
//
// demo is free software: anyone may use it.

int a;
";
  fs::write(temp_dir.path().join("engine.cpp"), content)?;
  git_add_and_commit_dated(temp_dir.path(), "engine.cpp", "Import engine", "2021-03-04T12:00:00 +0000")?;

  let repo = git::discover_repo(temp_dir.path())?;
  let root = git::first_commit(&repo)?;

  let config = test_config();
  let processor = Processor::new(&config, &[], false, None)?;
  let stats = processor.run(&repo, root)?;

  assert_eq!(stats.headers_added, 0);
  assert_eq!(stats.files_modified, 1);

  let synced = fs::read_to_string(temp_dir.path().join("engine.cpp"))?;
  let holder = synced.find("Copyright (c) 2020, 2021 Example Author").unwrap();
  let upstream = synced.find("Copyright (c) 2015 Upstream Project").unwrap();
  assert!(holder < upstream, "the holder's entry must lead the region");
  Ok(())
}
