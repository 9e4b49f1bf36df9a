//! Installing single packages and whole stages

mod common;

use common::TestWorkspace;
use predicates::prelude::*;

#[test]
fn test_install_local_archive() {
    let workspace = TestWorkspace::initialized();
    workspace.create_stages(&["Art"]);
    workspace.archive("Trees");
    workspace.cmd().args(["add", "Art", "Trees"]).assert().success();

    workspace
        .cmd()
        .args(["install", "Art", "Trees"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed 'Trees' (local asset)"));

    assert_eq!(
        workspace.read_file("Assets/Imported/Trees.unitypackage"),
        "archive Trees"
    );

    workspace
        .cmd()
        .args(["install", "Art", "Trees"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'Trees' is already installed"));

    workspace
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 of 1 installed)"));
}

#[test]
fn test_install_package_outside_stage_fails() {
    let workspace = TestWorkspace::initialized();
    workspace.create_stages(&["Art"]);

    workspace
        .cmd()
        .args(["install", "Art", "Trees"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Package 'Trees' is not part of stage 'Art'"));
}

#[test]
fn test_install_registry_package_updates_manifest() {
    let workspace = TestWorkspace::initialized();
    workspace.create_stages(&["Audio"]);
    workspace.write_file(
        "Packages/manifest.json",
        r#"{"dependencies": {"com.unity.timeline": "1.7.4"}, "scopedRegistries": []}"#,
    );
    workspace
        .cmd()
        .args(["add", "Audio", "Audio Tools", "--id", "com.studio.audio@1.2.0"])
        .assert()
        .success();

    workspace
        .cmd()
        .args(["install", "Audio", "Audio Tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(registry package)"));

    let manifest: serde_json::Value =
        serde_json::from_str(&workspace.read_file("Packages/manifest.json")).unwrap();
    assert_eq!(manifest["dependencies"]["com.studio.audio"], "1.2.0");
    assert_eq!(manifest["dependencies"]["com.unity.timeline"], "1.7.4");
    assert!(manifest["scopedRegistries"].is_array());

    workspace
        .cmd()
        .args(["status", "Audio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 of 1 installed)"));

    workspace
        .cmd()
        .args(["install-missing", "Audio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to install in 'Audio'."));
}

#[test]
fn test_install_missing_continues_past_failures() {
    let workspace = TestWorkspace::initialized();
    workspace.create_stages(&["Art"]);
    workspace.archive("Trees");
    workspace.cmd().args(["add", "Art", "Trees"]).assert().success();
    workspace
        .cmd()
        .args(["add", "Art", "--path", "missing/Rocks.unitypackage"])
        .assert()
        .success();
    workspace
        .cmd()
        .args(["add", "Art", "Audio Tools", "--id", "com.studio.audio@1.2.0"])
        .assert()
        .success();

    workspace
        .cmd()
        .args(["install-missing", "Art"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Trees"))
        .stdout(predicate::str::contains("✗ Rocks"))
        .stdout(predicate::str::contains("✓ Audio Tools"))
        .stdout(predicate::str::contains("2 installed, 1 failed"));

    assert!(workspace.file_exists("Assets/Imported/Trees.unitypackage"));
    assert!(workspace.read_file("Packages/manifest.json").contains("com.studio.audio"));
}

#[test]
fn test_install_missing_nothing_left() {
    let workspace = TestWorkspace::initialized();
    workspace.create_stages(&["Art"]);
    workspace.archive("Trees");
    workspace.cmd().args(["add", "Art", "Trees"]).assert().success();

    workspace
        .cmd()
        .args(["install-missing", "Art"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 installed, 0 failed"));

    workspace
        .cmd()
        .args(["install-missing", "Art"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to install in 'Art'."));
}

#[test]
fn test_install_missing_unknown_stage_fails() {
    let workspace = TestWorkspace::initialized();
    workspace
        .cmd()
        .args(["install-missing", "Art"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workflow stage 'Art' not found"));
}

#[cfg(unix)]
mod git_packages {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const MODELS_URI: &str = "https://github.com/3dtbd/Models.git";

    /// Install a stand-in for git and point the workspace at it
    fn fake_git(workspace: &TestWorkspace, script: &str) {
        let path = workspace.path.join("fake-git.sh");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        workspace
            .cmd()
            .args(["config", "set", "git_program"])
            .arg(&path)
            .assert()
            .success();
    }

    #[test]
    fn test_install_git_package_registers_submodule() {
        let workspace = TestWorkspace::initialized();
        fake_git(
            &workspace,
            &format!(
                "#!/bin/sh\n\
                 echo \"Cloning into 'Models'...\" >&2\n\
                 printf '[submodule \"Models\"]\\n\\tpath = Models\\n\\turl = %s\\n' \"$3\" >> '{}/.gitmodules'\n",
                workspace.path.display()
            ),
        );
        workspace.create_stages(&["Art"]);
        workspace.cmd().args(["add", "Art", "--git", MODELS_URI]).assert().success();

        workspace
            .cmd()
            .args(["install", "Art", "3dtbd_Models"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Installed '3dtbd_Models' (git package)"));

        workspace
            .cmd()
            .args(["show", "3dtbd_Models"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Installed: yes"));
    }

    #[test]
    fn test_git_error_line_is_reported() {
        let workspace = TestWorkspace::initialized();
        fake_git(
            &workspace,
            "#!/bin/sh\necho 'fatal: repository not found' >&2\nexit 128\n",
        );
        workspace.create_stages(&["Art"]);
        workspace.cmd().args(["add", "Art", "--git", MODELS_URI]).assert().success();

        workspace
            .cmd()
            .args(["install", "Art", "3dtbd_Models"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Git error: fatal: repository not found"));

        workspace
            .cmd()
            .args(["install-missing", "Art"])
            .assert()
            .success()
            .stdout(predicate::str::contains("0 installed, 1 failed"));
    }
}
