//! Package descriptors
//!
//! A [`PackageDescriptor`] describes one installable unit: a locally cached
//! package archive, a git-hosted package, or a registry package. Its
//! [`PackageKind`] is never stored; it is derived from which identifying
//! field is populated.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::capability::{ExternalState, Installer};
use super::report::IntegrityWarning;
use crate::error::Result;

/// How a package is located and installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    LocalAsset,
    GitPackage,
    RegistryPackage,
}

impl PackageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageKind::LocalAsset => "local asset",
            PackageKind::GitPackage => "git package",
            PackageKind::RegistryPackage => "registry package",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry returned by a registry search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub display_name: String,
    pub id: String,
    #[serde(default)]
    pub local_path: Option<String>,
}

/// Fields applied to descriptors created from a matching local archive path.
///
/// Profiles are an explicit registration list: the first profile whose
/// `path_suffix` ends the discovered path wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorProfile {
    pub path_suffix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_defines: Option<String>,
}

impl DescriptorProfile {
    fn matches(&self, path: &str) -> bool {
        let suffix = normalize_separators(&self.path_suffix);
        !suffix.is_empty() && normalize_separators(path).ends_with(&suffix)
    }

    fn apply(&self, descriptor: &mut PackageDescriptor) {
        descriptor.documentation.clone_from(&self.documentation);
        descriptor.forum.clone_from(&self.forum);
        descriptor.script_defines.clone_from(&self.script_defines);
    }
}

/// A record describing one package and how to check and perform its installation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,

    /// Registry package id (e.g. `com.studio.audio@1.2.0`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Archive path for local assets, asset path fragment for registry packages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_uri: Option<String>,

    /// Only meaningful for local assets
    #[serde(default)]
    pub installed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_defines: Option<String>,
}

const DEFAULT_REGISTRY_VERSION: &str = "latest";

/// Split a registry id of the form `name@version`.
///
/// A missing or empty version becomes `latest`.
pub fn split_registry_id(id: &str) -> (&str, &str) {
    match id.rsplit_once('@') {
        Some((name, version)) if !name.is_empty() && !version.is_empty() => (name, version),
        Some((name, _)) if !name.is_empty() => (name, DEFAULT_REGISTRY_VERSION),
        _ => (id, DEFAULT_REGISTRY_VERSION),
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

impl PackageDescriptor {
    /// Create an empty descriptor with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a descriptor for a git-hosted package.
    ///
    /// The name drops the protocol and host, the trailing `.git`, and joins
    /// the remaining path segments with underscores:
    /// `git@github.com:org/repo.git` becomes `org_repo`.
    pub fn from_git_uri(uri: &str) -> Self {
        Self {
            name: name_from_git_uri(uri),
            git_uri: Some(uri.to_string()),
            ..Self::default()
        }
    }

    /// Build a descriptor from a registry search result
    pub fn from_registry_entry(entry: &RegistryEntry) -> Self {
        Self {
            name: entry.display_name.clone(),
            id: Some(entry.id.clone()),
            path: entry.local_path.clone(),
            ..Self::default()
        }
    }

    /// Build a descriptor for a package archive found on disk.
    ///
    /// The name is the file name without its extension. The first profile
    /// matching the path contributes its informational fields.
    pub fn from_local_path(path: &Path, profiles: &[DescriptorProfile]) -> Self {
        let path_str = path.to_string_lossy().to_string();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path_str.clone());

        let mut descriptor = Self {
            name,
            path: Some(path_str.clone()),
            ..Self::default()
        };

        if let Some(profile) = profiles.iter().find(|p| p.matches(&path_str)) {
            profile.apply(&mut descriptor);
        }

        descriptor
    }

    /// Derive the package kind from the populated fields.
    ///
    /// A registry id always wins. Without an id, a path means a local asset
    /// and a git URI means a git package. A descriptor with none of the three
    /// falls through to the registry kind.
    pub fn classify(&self) -> PackageKind {
        if non_empty(self.id.as_ref()).is_some() {
            PackageKind::RegistryPackage
        } else if non_empty(self.path.as_ref()).is_some() {
            PackageKind::LocalAsset
        } else if non_empty(self.git_uri.as_ref()).is_some() {
            PackageKind::GitPackage
        } else {
            PackageKind::RegistryPackage
        }
    }

    /// The path, URI or id that identifies this package for its kind
    pub fn location_hint(&self) -> &str {
        let hint = match self.classify() {
            PackageKind::LocalAsset => self.path.as_ref(),
            PackageKind::GitPackage => self.git_uri.as_ref(),
            PackageKind::RegistryPackage => self.id.as_ref(),
        };
        non_empty(hint).unwrap_or("")
    }

    /// Whether the package is installed in the project described by `state`.
    ///
    /// Ambiguous registry matches are logged and still count as installed.
    pub fn is_installed(&self, state: &dyn ExternalState) -> bool {
        let (installed, warning) = self.installed_status(state);
        if let Some(warning) = warning {
            tracing::warn!("{warning}");
        }
        installed
    }

    /// Installed status plus any integrity warning found while computing it
    pub fn installed_status(&self, state: &dyn ExternalState) -> (bool, Option<IntegrityWarning>) {
        match self.classify() {
            PackageKind::LocalAsset => (self.installed, None),
            PackageKind::GitPackage => {
                let uri = non_empty(self.git_uri.as_ref()).unwrap_or("");
                (state.is_git_remote_registered(uri), None)
            }
            PackageKind::RegistryPackage => {
                // Match on the asset path when the registry reported one,
                // else on the package name part of the id.
                let fragment = non_empty(self.path.as_ref())
                    .or_else(|| non_empty(self.id.as_ref()).map(|id| split_registry_id(id).0))
                    .unwrap_or("");
                if fragment.is_empty() {
                    return (false, None);
                }

                let matches = state
                    .asset_paths()
                    .iter()
                    .filter(|p| p.contains(fragment))
                    .count();

                let warning = (matches > 1).then(|| IntegrityWarning::AmbiguousInstallMatch {
                    name: self.name.clone(),
                    fragment: fragment.to_string(),
                    matches,
                });
                (matches > 0, warning)
            }
        }
    }

    /// Install the package through `installer`.
    ///
    /// Local assets are flagged installed before the import runs and stay
    /// flagged whatever the import returns. Git and registry failures leave
    /// the descriptor untouched. Nothing is retried.
    pub fn install(&mut self, installer: &dyn Installer) -> Result<()> {
        match self.classify() {
            PackageKind::LocalAsset => {
                self.installed = true;
                let path = non_empty(self.path.as_ref()).unwrap_or("");
                installer.install_local_asset(path)
            }
            PackageKind::GitPackage => {
                let uri = non_empty(self.git_uri.as_ref()).unwrap_or("");
                let output = installer.install_git_remote(uri, installer.git_install_dir())?;
                tracing::debug!(package = %self.name, "git: {}", output.trim());
                Ok(())
            }
            PackageKind::RegistryPackage => {
                let id = non_empty(self.id.as_ref()).unwrap_or(self.name.as_str());
                installer.install_registry_package(id)
            }
        }
    }
}

fn name_from_git_uri(uri: &str) -> String {
    let rest = match uri.find("://") {
        // scheme://host/path
        Some(pos) => {
            let after = &uri[pos + 3..];
            after.find('/').map_or(after, |slash| &after[slash + 1..])
        }
        // user@host:path
        None => uri.find(':').map_or(uri, |colon| &uri[colon + 1..]),
    };

    rest.trim_end_matches('/')
        .trim_end_matches(".git")
        .trim_matches('/')
        .replace('/', "_")
}
