//! CLI integration tests using the real stagekit binary

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_help_output() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("workflow stage"))
        .stdout(predicate::str::contains("stage"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("install-missing"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_version_output() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stagekit"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_bash() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stagekit"));
}

#[test]
fn test_completions_unknown_shell() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tcsh"));
}

#[test]
fn test_commands_require_workspace() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .args(["stage", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workspace not found"));
}

#[test]
fn test_init_creates_workspace() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized workflow"));

    assert!(workspace.file_exists(".stagekit/settings.yaml"));
    assert!(workspace.file_exists(".stagekit/workflow.yaml"));
    assert!(workspace.file_exists(".stagekit/stages"));
    assert!(workspace.file_exists(".stagekit/descriptors"));
}

#[test]
fn test_init_twice_is_harmless() {
    let workspace = TestWorkspace::new();
    workspace.cmd().arg("init").assert().success();
    workspace
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn test_workspace_found_from_subdirectory() {
    let workspace = TestWorkspace::initialized();
    workspace.write_file("Assets/Scenes/.keep", "");

    workspace
        .cmd()
        .current_dir(workspace.path.join("Assets/Scenes"))
        .args(["stage", "create", "Art"])
        .assert()
        .success();

    assert!(workspace.file_exists(".stagekit/stages/Art.yaml"));
}

#[test]
fn test_workspace_flag() {
    let workspace = TestWorkspace::initialized();
    let elsewhere = TestWorkspace::new();

    elsewhere
        .cmd()
        .arg("--workspace")
        .arg(&workspace.path)
        .args(["stage", "create", "Audio"])
        .assert()
        .success();

    assert!(workspace.file_exists(".stagekit/stages/Audio.yaml"));
}
