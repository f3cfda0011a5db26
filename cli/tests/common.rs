//! # FsdGen CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Shared helpers for the integration test files. Each `.rs` file in
//! `cli/tests/` compiles as its own test crate against the `fsdgen` binary;
//! this module keeps the command and sandbox setup in one place.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// An `assert_cmd::Command` pointing at the compiled `fsdgen` binary.
pub fn fsdgen_cmd() -> Command {
    Command::cargo_bin("fsdgen").expect("Failed to find fsdgen binary for testing")
}

/// Creates an isolated project directory: a `.git` marker stops the config
/// ancestor search at the sandbox boundary, and `.fsdgen.toml` holds the
/// given project configuration.
pub fn project_with_config(config: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create project sandbox");
    fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
    fs::write(dir.path().join(".fsdgen.toml"), config).expect("Failed to write .fsdgen.toml");
    dir
}

/// A command scoped to the sandbox: working directory set to the project,
/// user-level configuration redirected inside it so a developer's real
/// `~/.config/fsdgen` never leaks into a test run.
pub fn cmd_in(project: &Path) -> Command {
    let mut cmd = fsdgen_cmd();
    cmd.current_dir(project)
        .env("HOME", project.join(".home"))
        .env("XDG_CONFIG_HOME", project.join(".xdg"));
    cmd
}

/// Writes a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write test file");
}
