//! Installing packages into a project
//!
//! [`ProjectInstaller`] is the production [`Installer`]:
//! - local archives are copied into the project's import directory
//! - git packages are added as submodules under the git install directory
//! - registry packages are recorded in the project registry manifest

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Settings;
use crate::domain::Installer;
use crate::error::{Result, install};
use crate::git;
use crate::registry::manifest;

#[derive(Debug, Clone)]
pub struct ProjectInstaller {
    root: PathBuf,
    import_dir: PathBuf,
    git_install_dir: String,
    git_program: String,
    git_timeout: Duration,
    registry_manifest: PathBuf,
}

impl ProjectInstaller {
    pub fn new(root: &Path, settings: &Settings) -> Self {
        Self {
            root: root.to_path_buf(),
            import_dir: Settings::resolve(root, &settings.import_dir),
            git_install_dir: settings.git_install_dir.clone(),
            git_program: settings.git_program.clone(),
            git_timeout: settings.git_timeout(),
            registry_manifest: Settings::resolve(root, &settings.registry_manifest),
        }
    }
}

impl Installer for ProjectInstaller {
    fn install_local_asset(&self, path: &str) -> Result<()> {
        let source = Path::new(path);
        let Some(file_name) = source.file_name() else {
            return Err(install::failed(path, "archive path has no file name"));
        };
        if !source.is_file() {
            return Err(install::failed(path, "archive not found"));
        }

        std::fs::create_dir_all(&self.import_dir)
            .map_err(|e| install::failed(path, format!("cannot create import directory: {e}")))?;

        let target = self.import_dir.join(file_name);
        std::fs::copy(source, &target).map_err(|e| install::failed(path, e.to_string()))?;

        tracing::debug!(archive = path, target = %target.display(), "archive imported");
        Ok(())
    }

    fn install_git_remote(&self, uri: &str, local_path: &str) -> Result<String> {
        let workdir = Settings::resolve(&self.root, local_path);
        git::submodule_add(&self.git_program, uri, &workdir, self.git_timeout)
    }

    fn install_registry_package(&self, id: &str) -> Result<()> {
        manifest::add_dependency(&self.registry_manifest, id)
    }

    fn git_install_dir(&self) -> &str {
        &self.git_install_dir
    }
}
