//! Snapshot of the project used for installed-status checks

use std::path::Path;

use walkdir::WalkDir;

use super::WORKSPACE_DIR;
use crate::domain::ExternalState;
use crate::git;
use crate::path_utils::to_forward_slashes;
use crate::registry::manifest;

/// Asset files whose name contains this are candidates for registry matches
const ASSET_NAME_MARKER: &str = "package";

const SKIPPED_DIRS: &[&str] = &[".git", WORKSPACE_DIR];

/// Directory registry packages are reported under
const REGISTRY_PACKAGES_DIR: &str = "Packages";

/// Registered submodule URLs and package-like asset paths, captured once.
///
/// Dependencies recorded in the registry manifest count as assets named
/// `Packages/<name>`, unless files of that package are already on disk.
#[derive(Debug, Default, Clone)]
pub struct ProjectState {
    remotes: Vec<String>,
    assets: Vec<String>,
}

impl ProjectState {
    pub fn scan(root: &Path, registry_manifest: &Path) -> Self {
        let remotes = git::registered_urls(root);
        let mut assets = scan_assets(root);

        for (name, _) in manifest::dependencies(registry_manifest) {
            let package = format!("{REGISTRY_PACKAGES_DIR}/{name}");
            let on_disk = assets
                .iter()
                .any(|a| a.strip_prefix(&package).is_some_and(|rest| rest.starts_with('/')));
            if !on_disk {
                assets.push(package);
            }
        }

        tracing::debug!(
            remotes = remotes.len(),
            assets = assets.len(),
            "project state scanned"
        );
        Self { remotes, assets }
    }
}

fn scan_assets(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir()
                && e.file_name()
                    .to_str()
                    .is_some_and(|name| SKIPPED_DIRS.contains(&name)))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .to_lowercase()
                .contains(ASSET_NAME_MARKER)
        })
        .filter_map(|e| {
            e.path()
                .strip_prefix(root)
                .ok()
                .map(to_forward_slashes)
        })
        .collect()
}

impl ExternalState for ProjectState {
    fn is_git_remote_registered(&self, uri: &str) -> bool {
        let uri = uri.trim_end_matches('/');
        !uri.is_empty() && self.remotes.iter().any(|r| r.trim_end_matches('/') == uri)
    }

    fn asset_paths(&self) -> &[String] {
        &self.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::{PackageDescriptor, RegistryEntry};
    use crate::installer::ProjectInstaller;
    use crate::test_fixtures::{create_git_repo, create_test_files};

    #[test]
    fn test_scan_collects_package_files() {
        let (temp, path) = create_git_repo();
        create_test_files(
            &temp,
            &[
                ("Packages/com.studio.audio/package.json", "{}"),
                ("Assets/Imported/Trees.unitypackage", "archive"),
                ("Assets/Scenes/Main.unity", "scene"),
                (".stagekit/descriptors/package.yaml", "name: package"),
            ],
        );

        let state = ProjectState::scan(&path, &path.join("Packages/manifest.json"));
        let mut assets = state.asset_paths().to_vec();
        assets.sort();
        assert_eq!(
            assets,
            vec![
                "Assets/Imported/Trees.unitypackage",
                "Packages/com.studio.audio/package.json"
            ]
        );
    }

    #[test]
    fn test_git_remote_registered_from_gitmodules() {
        let (temp, path) = create_git_repo();
        create_test_files(
            &temp,
            &[(
                ".gitmodules",
                "[submodule \"Models\"]\n\tpath = Packages/git/Models\n\turl = git@github.com:3dtbd/Models.git\n",
            )],
        );

        let state = ProjectState::scan(&path, &path.join("Packages/manifest.json"));
        assert!(state.is_git_remote_registered("git@github.com:3dtbd/Models.git"));
        assert!(!state.is_git_remote_registered("git@github.com:3dtbd/Textures.git"));
        assert!(!state.is_git_remote_registered(""));
    }

    #[test]
    fn test_registry_descriptor_matches_scanned_asset() {
        let (temp, path) = create_git_repo();
        create_test_files(&temp, &[("Packages/com.studio.audio/package.json", "{}")]);
        let state = ProjectState::scan(&path, &path.join("Packages/manifest.json"));

        let descriptor = PackageDescriptor {
            id: Some("com.studio.audio@1.2.0".to_string()),
            path: Some("Packages/com.studio.audio".to_string()),
            ..PackageDescriptor::new("Audio")
        };
        assert!(descriptor.is_installed(&state));
    }

    #[test]
    fn test_manifest_dependencies_count_as_assets() {
        let (temp, path) = create_git_repo();
        create_test_files(
            &temp,
            &[
                ("Packages/com.studio.fx/package.json", "{}"),
                (
                    "Packages/manifest.json",
                    r#"{"dependencies": {"com.studio.audio": "1.2.0", "com.studio.fx": "2.0.0"}}"#,
                ),
            ],
        );

        let state = ProjectState::scan(&path, &path.join("Packages/manifest.json"));
        let mut assets = state.asset_paths().to_vec();
        assets.sort();
        assert_eq!(
            assets,
            vec!["Packages/com.studio.audio", "Packages/com.studio.fx/package.json"]
        );
    }

    #[test]
    fn test_registry_package_installed_after_install() {
        let (_temp, path) = create_git_repo();
        let manifest_path = path.join("Packages/manifest.json");
        let installer = ProjectInstaller::new(&path, &Settings::default());
        let mut descriptor = PackageDescriptor::from_registry_entry(&RegistryEntry {
            display_name: "Audio Tools".to_string(),
            id: "com.studio.audio@1.2.0".to_string(),
            local_path: None,
        });

        assert!(!descriptor.is_installed(&ProjectState::scan(&path, &manifest_path)));
        descriptor.install(&installer).unwrap();
        assert!(descriptor.is_installed(&ProjectState::scan(&path, &manifest_path)));
    }
}
