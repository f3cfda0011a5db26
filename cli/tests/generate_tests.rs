//! # FsdGen CLI Generate Integration Tests
//!
//! File: cli/tests/generate_tests.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! End-to-end tests for the `fsdgen generate` subcommand group, exercising
//! the full pipeline from argument parsing through config loading, template
//! rendering, and idempotent writes against a sandboxed project directory.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_generate_component_creates_slice_layout() {
    let project = project_with_config("");

    cmd_in(project.path())
        .args([
            "generate", "component", "UserCard", "--layer", "entity", "--slice", "User",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("create").and(predicate::str::contains("UserCard.tsx")));

    let ui = project.path().join("src/entities/User/ui");
    let component = fs::read_to_string(ui.join("UserCard.tsx")).unwrap();
    assert!(component.contains("export const UserCard"));

    // Both barrel tiers were maintained.
    let ui_barrel = fs::read_to_string(ui.join("index.ts")).unwrap();
    assert!(ui_barrel.contains("export * from './UserCard';"));
    let slice_barrel =
        fs::read_to_string(project.path().join("src/entities/User/index.ts")).unwrap();
    assert!(slice_barrel.contains("export * from './ui';"));
}

#[test]
fn test_generate_rerun_skips_existing_files() {
    let project = project_with_config("");
    let args = [
        "generate", "component", "UserCard", "-l", "entity", "-s", "User",
    ];

    cmd_in(project.path()).args(args).assert().success();
    cmd_in(project.path())
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Nothing to do; all files already exist.",
        ));

    // The rerun appended no duplicate barrel exports.
    let ui_barrel =
        fs::read_to_string(project.path().join("src/entities/User/ui/index.ts")).unwrap();
    assert_eq!(ui_barrel.matches("UserCard").count(), 1);
}

#[test]
fn test_generate_hook_in_shared_layer() {
    let project = project_with_config("");

    cmd_in(project.path())
        .args(["generate", "hook", "useClient", "-l", "shared", "-s", "api"])
        .assert()
        .success();

    let slice = project.path().join("src/shared/api");
    let hook = fs::read_to_string(slice.join("useClient.ts")).unwrap();
    assert!(hook.contains("export const useClient"));
    // Shared folds slice and ui together: exactly one barrel, no ui dir.
    assert!(slice.join("index.ts").exists());
    assert!(!slice.join("ui").exists());
}

#[test]
fn test_generate_component_explicit_path() {
    let project = project_with_config("");

    cmd_in(project.path())
        .args([
            "generate", "component", "Banner", "-l", "widget", "-s", "Promo", "--path",
            "custom/{{nameKebab}}/Banner.tsx",
        ])
        .assert()
        .success();

    // Placeholders in the path are substituted; no slice layout is created.
    assert!(project.path().join("custom/banner/Banner.tsx").exists());
    assert!(!project.path().join("src/widgets").exists());
}

#[test]
fn test_naming_policy_error_rejects_non_pascal_case() {
    let project = project_with_config("naming = \"error\"\n");

    cmd_in(project.path())
        .args(["generate", "component", "user-card", "-l", "entity", "-s", "User"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not PascalCase"));

    assert!(!project.path().join("src").exists());
}

#[test]
fn test_naming_policy_auto_fix_converts_name() {
    let project = project_with_config("naming = \"autoFix\"\n");

    cmd_in(project.path())
        .args(["generate", "component", "user-card", "-l", "entity", "-s", "User"])
        .assert()
        .success();

    assert!(project
        .path()
        .join("src/entities/User/ui/UserCard.tsx")
        .exists());
}

#[test]
fn test_custom_template_override_wins_over_builtin() {
    let project = project_with_config("templates_dir = \"tpl\"\n");
    write_file(
        &project.path().join("tpl/entity/component/Component.tsx"),
        "// custom\nexport const {{componentName}} = () => null; // {{role}}\n",
    );

    cmd_in(project.path())
        .args([
            "generate", "component", "UserCard", "-l", "entity", "-s", "User", "--var",
            "role=admin",
        ])
        .assert()
        .success();

    let component = fs::read_to_string(
        project.path().join("src/entities/User/ui/UserCard.tsx"),
    )
    .unwrap();
    assert!(component.starts_with("// custom"));
    assert!(component.contains("// admin"));
    // The override ships no styles template, so no styles sibling appears.
    assert!(!project
        .path()
        .join("src/entities/User/ui/UserCard.styles.ts")
        .exists());
}

#[test]
fn test_configured_root_dir_is_respected() {
    let project = project_with_config("root_dir = \"app/src\"\n");

    cmd_in(project.path())
        .args(["generate", "component", "UserCard", "-l", "entity", "-s", "User"])
        .assert()
        .success();

    assert!(project
        .path()
        .join("app/src/entities/User/ui/UserCard.tsx")
        .exists());
    assert!(!project.path().join("src").exists());
}
