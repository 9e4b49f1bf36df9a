//! Stage files: one YAML file per stage under `stages/`, plus `workflow.yaml`
//! recording the workflow name and stage order

use std::path::{Path, PathBuf};

use crate::domain::{StageRegistry, WorkflowManifest};
use crate::error::{Result, config, fs};
use crate::path_utils::file_key;

pub const WORKFLOW_FILE: &str = "workflow.yaml";

pub fn path_for(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.yaml", file_key(name)))
}

/// Load a stage by name, or `None` if it has no file yet
pub fn load(dir: &Path, name: &str) -> Result<Option<StageRegistry>> {
    let path = path_for(dir, name);
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
    let mut stage: StageRegistry = serde_yaml::from_str(&content)
        .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;

    // Two names can share a file key; the stored name is the one that counts.
    if stage.name != name {
        tracing::warn!(
            "Stage file {} holds stage '{}', not '{name}'",
            path.display(),
            stage.name
        );
        stage.name = name.to_string();
    }
    Ok(Some(stage))
}

pub fn save(dir: &Path, stage: &StageRegistry) -> Result<()> {
    let path = path_for(dir, &stage.name);
    let yaml = serde_yaml::to_string(stage)?;
    std::fs::write(&path, yaml)
        .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
}

pub fn load_manifest(data_dir: &Path) -> Result<Option<WorkflowManifest>> {
    let path = data_dir.join(WORKFLOW_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))
}

pub fn save_manifest(data_dir: &Path, manifest: &WorkflowManifest) -> Result<()> {
    let path = data_dir.join(WORKFLOW_FILE);
    let yaml = serde_yaml::to_string(manifest)?;
    std::fs::write(&path, yaml)
        .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
}
