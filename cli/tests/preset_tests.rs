//! # FsdGen CLI Preset Integration Tests
//!
//! File: cli/tests/preset_tests.rs
//! Repository: https://github.com/fsdgen/fsdgen
//!
//! ## Overview
//!
//! End-to-end tests for the `fsdgen preset` subcommand group: running manual
//! and auto-discovery presets, route injection, and the full reverse loop
//! (analyze sources, build a preset, run it for a fresh entity).
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

const TPL_CONFIG: &str = "templates_dir = \"tpl\"\n";

#[test]
fn test_run_unknown_preset_fails() {
    let project = project_with_config(TPL_CONFIG);
    fs::create_dir_all(project.path().join("tpl")).unwrap();

    cmd_in(project.path())
        .args(["preset", "run", "nope", "User"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset 'nope' not found"));
}

#[test]
fn test_run_without_templates_dir_fails() {
    let project = project_with_config("");

    cmd_in(project.path())
        .args(["preset", "run", "crud", "User"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("templates_dir"));
}

#[test]
fn test_run_manual_preset_with_builtin_templates() {
    let project = project_with_config(TPL_CONFIG);
    write_file(
        &project.path().join("tpl/preset/basic/preset.toml"),
        r#"
discovery = "manual"

[[actions]]
type = "component"
layer = "entity"
name = "{{entityName}}Card"
"#,
    );

    cmd_in(project.path())
        .args(["preset", "run", "basic", "Post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done."));

    let component = fs::read_to_string(
        project.path().join("src/entities/Post/ui/PostCard.tsx"),
    )
    .unwrap();
    assert!(component.contains("export const PostCard"));
}

#[test]
fn test_run_auto_preset_injects_route() {
    let project = project_with_config(TPL_CONFIG);
    write_file(
        &project.path().join("tpl/preset/pages/preset.toml"),
        r#"
discovery = "auto"

[routing]
path = "/{{entityNameKebab}}"
import_path = "src/pages/{{entityName}}/ui/{{componentName}}"
"#,
    );
    write_file(
        &project.path().join("tpl/preset/pages/page/page/Component.tsx"),
        "export const {{componentName}} = () => <main>{{entityName}}</main>;\n",
    );
    write_file(
        &project.path().join("src/App.tsx"),
        "import React from 'react';\n\nexport const App = () => (\n  <Routes>\n    {/* fsdgen:routes */}\n  </Routes>\n);\n",
    );

    cmd_in(project.path())
        .args(["preset", "run", "pages", "Order"])
        .assert()
        .success();

    let page = fs::read_to_string(
        project.path().join("src/pages/Order/ui/OrderPage.tsx"),
    )
    .unwrap();
    assert!(page.contains("export const OrderPage"));

    let app = fs::read_to_string(project.path().join("src/App.tsx")).unwrap();
    assert!(app.contains("import { OrderPage } from 'src/pages/Order/ui/OrderPage';"));
    assert!(app.contains("path=\"/order\""));
    // The marker survives for the next injection.
    assert!(app.contains("{/* fsdgen:routes */}"));
}

#[test]
fn test_rerun_preset_is_idempotent() {
    let project = project_with_config(TPL_CONFIG);
    write_file(
        &project.path().join("tpl/preset/basic/preset.toml"),
        r#"
discovery = "manual"

[[actions]]
type = "component"
layer = "entity"
name = "{{entityName}}Card"
"#,
    );

    cmd_in(project.path())
        .args(["preset", "run", "basic", "Post"])
        .assert()
        .success();
    cmd_in(project.path())
        .args(["preset", "run", "basic", "Post"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Nothing to do; all files already exist.",
        ));
}

#[test]
fn test_analyze_writes_artifact() {
    let project = project_with_config("");
    write_file(
        &project.path().join("sources/User/ui/UserProfile.tsx"),
        "export const UserProfile = () => <div>User</div>;\n",
    );
    write_file(
        &project.path().join("sources/source.toml"),
        "root = \"User\"\ntarget_layer = \"entity\"\n",
    );

    cmd_in(project.path())
        .args(["preset", "analyze", "sources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("subject 'User'"));

    let artifact = fs::read_to_string(
        project.path().join("sources/preset.generated.toml"),
    )
    .unwrap();
    assert!(artifact.contains("subject = \"User\""));
    assert!(artifact.contains("ENTITY_NAME"));
}

#[test]
fn test_build_without_analyze_fails() {
    let project = project_with_config("");
    write_file(
        &project.path().join("sources/source.toml"),
        "root = \"User\"\ntarget_layer = \"entity\"\n",
    );
    fs::create_dir_all(project.path().join("sources/User")).unwrap();

    cmd_in(project.path())
        .args(["preset", "build", "sources"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preset.generated.toml"));
}

/// The full reverse loop: analyze real sources, build an ejected preset
/// into the templates tree, then run it for a different entity.
#[test]
fn test_reverse_loop_analyze_build_run() {
    let project = project_with_config(TPL_CONFIG);
    write_file(
        &project.path().join("sources/User/ui/UserProfile.tsx"),
        "export const UserProfile = () => <div>User</div>;\n",
    );
    write_file(
        &project.path().join("sources/source.toml"),
        "root = \"User\"\ntarget_layer = \"entity\"\n",
    );

    cmd_in(project.path())
        .args(["preset", "analyze", "sources"])
        .assert()
        .success();

    cmd_in(project.path())
        .args(["preset", "build", "sources", "--output", "tpl/preset/crud"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 template file(s)"));

    // The stored template is fully parameterized.
    let template = fs::read_to_string(
        project
            .path()
            .join("tpl/preset/crud/files/entity/User/ui/{{entityName}}Profile.tsx"),
    )
    .unwrap();
    assert_eq!(
        template,
        "export const {{entityName}}Profile = () => <div>{{entityName}}</div>;\n"
    );

    cmd_in(project.path())
        .args(["preset", "run", "crud", "Post"])
        .assert()
        .success();

    let generated = fs::read_to_string(
        project.path().join("src/entities/Post/ui/PostProfile.tsx"),
    )
    .unwrap();
    assert_eq!(
        generated,
        "export const PostProfile = () => <div>Post</div>;\n"
    );
}

#[test]
fn test_list_shows_presets() {
    let project = project_with_config(TPL_CONFIG);
    write_file(
        &project.path().join("tpl/preset/basic/preset.toml"),
        "discovery = \"auto\"\n",
    );
    fs::create_dir_all(project.path().join("tpl/entity/component")).unwrap();

    cmd_in(project.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("basic")
                .and(predicate::str::contains("auto discovery"))
                .and(predicate::str::contains("entity/")),
        );
}
