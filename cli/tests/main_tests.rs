//! # FsdGen CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! Verifies the top-level behavior of the `fsdgen` command-line interface:
//! standard flags like `--version` and `--help`, and argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    fsdgen_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fsdgen"));
}

#[test]
fn test_help_lists_command_groups() {
    fsdgen_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("generate")
                .and(predicate::str::contains("preset"))
                .and(predicate::str::contains("list")),
        );
}

#[test]
fn test_no_arguments_fails_with_usage() {
    fsdgen_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    fsdgen_cmd().arg("frobnicate").assert().failure();
}
