//! Collaborator capabilities consumed by the domain model
//!
//! The domain never talks to git, the file system or a package registry
//! directly. Installation, installed-status checks and registry searches go
//! through these traits so stages can be reconciled and tested against any
//! backend.

use super::descriptor::RegistryEntry;
use crate::error::Result;

/// Directory (relative to the project root) that git packages are added under
pub const DEFAULT_GIT_INSTALL_DIR: &str = "Packages/git";

/// Performs installs on behalf of a [`PackageDescriptor`](super::PackageDescriptor)
pub trait Installer {
    /// Import a locally cached package archive into the project
    fn install_local_asset(&self, path: &str) -> Result<()>;

    /// Add a repository to the project as a submodule under `local_path`.
    ///
    /// Returns whatever the tool printed on standard output.
    fn install_git_remote(&self, uri: &str, local_path: &str) -> Result<String>;

    /// Request installation of a registry package by id
    fn install_registry_package(&self, id: &str) -> Result<()>;

    /// Where git packages should be placed, relative to the project root
    fn git_install_dir(&self) -> &str {
        DEFAULT_GIT_INSTALL_DIR
    }
}

/// Read-only view of the project used to decide whether a package is installed
pub trait ExternalState {
    /// Whether `uri` is registered as a submodule/remote of the project
    fn is_git_remote_registered(&self, uri: &str) -> bool;

    /// Project asset paths that registry packages are matched against
    fn asset_paths(&self) -> &[String];
}

/// A package registry that can list the packages it offers.
///
/// `search` runs on a background worker thread, so implementations must be
/// shareable across threads and may block.
pub trait RegistrySource: Send + Sync {
    fn search(&self) -> Result<Vec<RegistryEntry>>;
}
