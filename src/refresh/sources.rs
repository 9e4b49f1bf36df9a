//! Catalog sources: archives in the asset cache, known git URIs and registry results

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::domain::{DescriptorProfile, PackageDescriptor, RegistryEntry};
use crate::error::{Result, config};
use crate::path_utils::to_forward_slashes;

/// Every archive with `extension` below `dir`, sorted by path.
///
/// A missing directory yields no archives. Unreadable entries are skipped.
pub fn scan_archives(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "asset cache not found; no local archives");
        return Ok(Vec::new());
    }

    let pattern = format!("**/*.{}", extension.trim_start_matches('.'));
    let glob = Glob::new(&pattern)
        .map_err(|e| config::invalid(format!("archive_extension '{extension}': {e}")))?;

    let mut archives: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable asset cache entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path().strip_prefix(dir).is_ok_and(|relative| {
                let relative = to_forward_slashes(relative);
                glob.matched(&CandidatePath::from(relative.as_str())).is_some()
            })
        })
        .map(|e| e.into_path())
        .collect();

    archives.sort();
    Ok(archives)
}

/// Descriptors for the archives in the asset cache
pub fn local_descriptors(
    dir: &Path,
    extension: &str,
    profiles: &[DescriptorProfile],
) -> Result<Vec<PackageDescriptor>> {
    Ok(scan_archives(dir, extension)?
        .iter()
        .map(|path| PackageDescriptor::from_local_path(path, profiles))
        .collect())
}

pub fn git_descriptors(uris: &[String]) -> Vec<PackageDescriptor> {
    uris.iter()
        .map(|uri| uri.trim())
        .filter(|uri| !uri.is_empty())
        .map(PackageDescriptor::from_git_uri)
        .collect()
}

pub fn registry_descriptors(entries: &[RegistryEntry]) -> Vec<PackageDescriptor> {
    entries.iter().map(PackageDescriptor::from_registry_entry).collect()
}

/// Concatenate sources in priority order, keep the first descriptor of each
/// name, and order the result by name
pub fn merge(sources: impl IntoIterator<Item = Vec<PackageDescriptor>>) -> Vec<PackageDescriptor> {
    let mut seen = HashSet::new();
    let mut catalog: Vec<PackageDescriptor> = sources
        .into_iter()
        .flatten()
        .filter(|d| {
            let fresh = seen.insert(d.name.clone());
            if !fresh {
                tracing::debug!(package = %d.name, "duplicate catalog name ignored");
            }
            fresh
        })
        .collect();
    catalog.sort_by(|a, b| a.name.cmp(&b.name));
    catalog
}
