//! Test fixtures shared by unit tests.
//!
//! Provides in-memory stand-ins for the installer and project-state
//! capabilities, plus helpers that create temp directories, git repos and
//! initialized workspaces with a single call.
//!
//! ```ignore
//! use crate::test_fixtures::{FakeInstaller, FakeState, create_workspace};
//!
//! let state = FakeState::default().with_remote("git@github.com:org/repo.git");
//! let installer = FakeInstaller::default().failing("broken");
//! let (temp, workspace) = create_workspace();
//! ```

use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use crate::domain::{ExternalState, Installer, RegistryEntry, RegistrySource};
use crate::error::{Result, git, install};

/// Records every install request; requests mentioning a configured key fail.
#[derive(Debug, Default)]
pub struct FakeInstaller {
    failing: Vec<String>,
    local: RefCell<Vec<String>>,
    git: RefCell<Vec<String>>,
    registry: RefCell<Vec<String>>,
}

impl FakeInstaller {
    #[must_use]
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.push(key.to_string());
        self
    }

    fn fails(&self, target: &str) -> bool {
        self.failing.iter().any(|k| target.contains(k.as_str()))
    }

    pub fn local_imports(&self) -> Vec<String> {
        self.local.borrow().clone()
    }

    pub fn git_adds(&self) -> Vec<String> {
        self.git.borrow().clone()
    }

    pub fn registry_requests(&self) -> Vec<String> {
        self.registry.borrow().clone()
    }
}

impl Installer for FakeInstaller {
    fn install_local_asset(&self, path: &str) -> Result<()> {
        self.local.borrow_mut().push(path.to_string());
        if self.fails(path) {
            return Err(install::failed(path, "import failed"));
        }
        Ok(())
    }

    fn install_git_remote(&self, uri: &str, _local_path: &str) -> Result<String> {
        self.git.borrow_mut().push(uri.to_string());
        if self.fails(uri) {
            return Err(git::command_failed(format!(
                "fatal: repository '{uri}' not found"
            )));
        }
        Ok(String::new())
    }

    fn install_registry_package(&self, id: &str) -> Result<()> {
        self.registry.borrow_mut().push(id.to_string());
        if self.fails(id) {
            return Err(install::failed(id, "registry rejected the request"));
        }
        Ok(())
    }
}

/// Fixed project state
#[derive(Debug, Default, Clone)]
pub struct FakeState {
    remotes: Vec<String>,
    assets: Vec<String>,
}

impl FakeState {
    #[must_use]
    pub fn with_remote(mut self, uri: &str) -> Self {
        self.remotes.push(uri.to_string());
        self
    }

    #[must_use]
    pub fn with_asset(mut self, path: &str) -> Self {
        self.assets.push(path.to_string());
        self
    }
}

impl ExternalState for FakeState {
    fn is_git_remote_registered(&self, uri: &str) -> bool {
        self.remotes.iter().any(|r| r == uri)
    }

    fn asset_paths(&self) -> &[String] {
        &self.assets
    }
}

/// Registry returning a fixed list, optionally after a delay or as a failure
#[derive(Debug, Default, Clone)]
pub struct StaticRegistry {
    entries: Vec<RegistryEntry>,
    fail: bool,
    delay: Option<Duration>,
}

impl StaticRegistry {
    /// Entries from (display name, id) pairs
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, id)| RegistryEntry {
                    display_name: (*name).to_string(),
                    id: (*id).to_string(),
                    local_path: None,
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl RegistrySource for StaticRegistry {
    fn search(&self) -> Result<Vec<RegistryEntry>> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.fail {
            return Err(install::search_failed("registry unreachable"));
        }
        Ok(self.entries.clone())
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a temp directory with a git repository initialized.
///
/// # Panics
///
/// Panics if the temp directory or git repository cannot be created.
#[must_use]
pub fn create_git_repo() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let path = temp.path().to_path_buf();
    git2::Repository::init(&path).expect("Failed to init git repository");
    (temp, path)
}

/// Create a git repo with an initialized stagekit workspace whose asset cache
/// lives inside the temp directory.
///
/// # Panics
///
/// Panics if any step fails.
#[must_use]
pub fn create_workspace() -> (TempDir, crate::workspace::Workspace) {
    let (temp, path) = create_git_repo();
    let mut settings = crate::config::Settings::default();
    settings.asset_cache_dir = path.join("asset-cache").to_string_lossy().to_string();
    let workspace = crate::workspace::Workspace::init_with(&path, settings)
        .expect("Failed to init workspace");
    (temp, workspace)
}

/// Create files under the temp directory from (relative path, content) pairs.
///
/// # Panics
///
/// Panics if any file cannot be created.
pub fn create_test_files(temp: &TempDir, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = temp.path().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_git_repo() {
        let (temp, path) = create_git_repo();
        assert!(path.join(".git").exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_create_workspace() {
        let (temp, workspace) = create_workspace();
        assert!(temp.path().join(".stagekit/settings.yaml").exists());
        assert_eq!(workspace.root, temp.path());
    }

    #[test]
    fn test_fake_installer_failing_key() {
        let installer = FakeInstaller::default().failing("broken");
        assert!(installer.install_registry_package("com.broken.pkg").is_err());
        assert!(installer.install_registry_package("com.fine.pkg").is_ok());
        assert_eq!(installer.registry_requests().len(), 2);
    }
}
