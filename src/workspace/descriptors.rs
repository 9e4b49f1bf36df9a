//! Descriptor files: one YAML file per package under `descriptors/`

use std::path::{Path, PathBuf};

use crate::domain::{DescriptorStore, PackageDescriptor};
use crate::error::{Result, config, fs};
use crate::path_utils::file_key;

const EXTENSION: &str = "yaml";

pub fn path_for(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{EXTENSION}", file_key(name)))
}

/// Load every descriptor file in `dir`, sorted by file name
pub fn load_all(dir: &Path) -> Result<Vec<PackageDescriptor>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| config::read_failed(dir.display().to_string(), e.to_string()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == EXTENSION))
        .collect();
    paths.sort();

    paths.iter().map(|p| load(p)).collect()
}

pub fn load(path: &Path) -> Result<PackageDescriptor> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
    serde_yaml::from_str(&content)
        .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))
}

pub fn save(dir: &Path, descriptor: &PackageDescriptor) -> Result<()> {
    let path = path_for(dir, &descriptor.name);
    let yaml = serde_yaml::to_string(descriptor)?;
    std::fs::write(&path, yaml)
        .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
}

/// Write the descriptors changed since the store was last saved
pub fn save_dirty(dir: &Path, store: &mut DescriptorStore) -> Result<usize> {
    let mut written = 0;
    for descriptor in store.dirty() {
        save(dir, descriptor)?;
        written += 1;
    }
    store.mark_clean();
    Ok(written)
}
