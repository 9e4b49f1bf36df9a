//! Project registry manifest (`Packages/manifest.json`)
//!
//! Registry installs are recorded as `"name": "version"` pairs under the
//! manifest's `dependencies` object. Every other key in the file is kept as is.

use std::path::Path;

use serde_json::{Map, Value};

use crate::domain::descriptor::split_registry_id;
use crate::error::{Result, install};

const DEPENDENCIES_KEY: &str = "dependencies";

/// Names and versions recorded under `dependencies`.
///
/// A missing or unreadable manifest has no dependencies.
pub fn dependencies(path: &Path) -> Vec<(String, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let manifest: Value = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::warn!("Ignoring unreadable registry manifest {}: {e}", path.display());
            return Vec::new();
        }
    };

    manifest
        .get(DEPENDENCIES_KEY)
        .and_then(Value::as_object)
        .map(|deps| {
            deps.iter()
                .map(|(name, version)| {
                    (name.clone(), version.as_str().unwrap_or_default().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Record `id` as a dependency in the manifest at `path`, creating the file if needed
pub fn add_dependency(path: &Path, id: &str) -> Result<()> {
    let manifest_path = path.display().to_string();
    let fail = |reason: String| install::manifest_failed(manifest_path.clone(), reason);

    let mut manifest = if path.is_file() {
        let content = std::fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
        if content.trim().is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(&content).map_err(|e| fail(e.to_string()))?
        }
    } else {
        Value::Object(Map::new())
    };

    let Value::Object(root) = &mut manifest else {
        return Err(fail("manifest is not a JSON object".to_string()));
    };

    let dependencies = root
        .entry(DEPENDENCIES_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(dependencies) = dependencies else {
        return Err(fail(format!("'{DEPENDENCIES_KEY}' is not a JSON object")));
    };

    let (name, version) = split_registry_id(id);
    dependencies.insert(name.to_string(), Value::String(version.to_string()));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
    }
    let json = serde_json::to_string_pretty(&manifest).map_err(|e| fail(e.to_string()))?;
    std::fs::write(path, json + "\n").map_err(|e| fail(e.to_string()))?;

    tracing::debug!(manifest = %manifest_path, package = name, version, "registry dependency recorded");
    Ok(())
}
