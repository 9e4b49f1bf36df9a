//! Common test utilities for stagekit integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory with its own git repository and asset cache
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the project root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new project directory backed by a git repository
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        git2::Repository::init(&path).expect("Failed to init git repository");
        Self { temp, path }
    }

    /// Create a workspace with no known git URIs, so the catalog only holds
    /// what the test puts into it
    pub fn initialized() -> Self {
        let workspace = Self::new();
        workspace.cmd().arg("init").assert().success();
        workspace
            .cmd()
            .args(["config", "set", "known_git_uris", ""])
            .assert()
            .success();
        workspace
    }

    /// Command for the stagekit binary, run from the project root
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stagekit").expect("Failed to find stagekit binary");
        cmd.current_dir(&self.path)
            .env("STAGEKIT_ASSET_CACHE", self.asset_cache())
            .env_remove("STAGEKIT_WORKSPACE")
            .env_remove("STAGEKIT_LOG");
        cmd
    }

    pub fn asset_cache(&self) -> PathBuf {
        self.path.join("asset-cache")
    }

    /// Drop a package archive into the asset cache
    #[allow(dead_code)]
    pub fn archive(&self, name: &str) -> PathBuf {
        let path = self.asset_cache().join(format!("{name}.unitypackage"));
        std::fs::create_dir_all(self.asset_cache()).expect("Failed to create asset cache");
        std::fs::write(&path, format!("archive {name}")).expect("Failed to write archive");
        path
    }

    /// Write a file in the project
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create stages in order
    #[allow(dead_code)]
    pub fn create_stages(&self, names: &[&str]) {
        for name in names {
            self.cmd()
                .args(["stage", "create", name])
                .assert()
                .success();
        }
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
