//! Workspace management for stagekit
//!
//! This module handles:
//! - Workspace detection and initialization
//! - Loading and saving the workflow, its stages and the descriptor store
//! - Building the production installer and project snapshot
//!
//! ## Workspace Structure
//!
//! ```text
//! .stagekit/
//! ├── settings.yaml     # Settings
//! ├── workflow.yaml     # Workflow name and stage order
//! ├── stages/           # One file per stage (package names)
//! └── descriptors/      # One file per package descriptor
//! ```
//!
//! `settings.yaml` always lives in `.stagekit/`; the other entries live in
//! the `data_dir` setting, which defaults to `.stagekit` as well.

pub mod descriptors;
pub mod project_state;
pub mod stages;

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::domain::{DescriptorStore, StageRegistry, WorkflowRegistry};
use crate::error::{Result, config, fs, workspace};
use crate::installer::ProjectInstaller;

pub use project_state::ProjectState;

/// Workspace directory name
pub const WORKSPACE_DIR: &str = ".stagekit";

const DEFAULT_WORKFLOW_NAME: &str = "workflow";

#[derive(Debug)]
pub struct Workspace {
    /// Project root (where `.stagekit` is located)
    pub root: PathBuf,

    pub stagekit_dir: PathBuf,

    pub settings: Settings,

    pub workflow: WorkflowRegistry,

    /// Every known descriptor, shared by all stages
    pub store: DescriptorStore,
}

impl Workspace {
    /// Detect if a workspace exists at the given path
    pub fn exists(root: &Path) -> bool {
        root.join(WORKSPACE_DIR).is_dir()
    }

    /// Find a workspace by searching upward from the given path
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        start.ancestors().find(|dir| Self::exists(dir)).map(Path::to_path_buf)
    }

    /// Resolve the workspace root from an explicit path or the current directory.
    ///
    /// An explicit path is used as is; otherwise the nearest ancestor of the
    /// current directory holding a workspace wins.
    pub fn locate(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path);
        }

        let cwd = std::env::current_dir()
            .map_err(|e| fs::io_error(format!("Failed to get current directory: {e}")))?;
        Self::find_from(&cwd).ok_or_else(|| workspace::not_found(cwd.display().to_string()))
    }

    /// Initialize a workspace with default settings
    pub fn init(root: &Path) -> Result<Self> {
        Self::init_with(root, Settings::default())
    }

    /// Initialize a workspace with the given settings.
    ///
    /// The workflow is named after the project directory.
    pub fn init_with(root: &Path, settings: Settings) -> Result<Self> {
        settings.validate()?;

        let stagekit_dir = root.join(WORKSPACE_DIR);
        std::fs::create_dir_all(&stagekit_dir).map_err(|e| {
            config::dir_create_failed(stagekit_dir.display().to_string(), e.to_string())
        })?;
        settings.ensure_directories(root)?;

        let name = root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_WORKFLOW_NAME)
            .to_string();

        let mut workspace = Self {
            root: root.to_path_buf(),
            stagekit_dir,
            settings,
            workflow: WorkflowRegistry::new(name),
            store: DescriptorStore::new(),
        };
        workspace.save()?;

        tracing::debug!(root = %root.display(), "workspace initialized");
        Ok(workspace)
    }

    /// Open an existing workspace
    pub fn open(root: &Path) -> Result<Self> {
        let stagekit_dir = root.join(WORKSPACE_DIR);
        if !stagekit_dir.is_dir() {
            return Err(workspace::not_found(root.display().to_string()));
        }

        let settings = Settings::load(&stagekit_dir)?;
        settings.ensure_directories(root)?;

        let store = DescriptorStore::from_descriptors(descriptors::load_all(
            &settings.descriptors_path(root),
        )?);

        let data_dir = settings.data_path(root);
        let stages_dir = settings.stages_path(root);
        let manifest = stages::load_manifest(&data_dir)?.unwrap_or_default();

        let name = if manifest.name.is_empty() {
            root.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DEFAULT_WORKFLOW_NAME)
                .to_string()
        } else {
            manifest.name.clone()
        };
        tracing::debug!(
            stages = manifest.stages.len(),
            descriptors = store.len(),
            "workspace loaded"
        );

        let mut workflow = WorkflowRegistry::new(name);
        for stage_name in &manifest.stages {
            let stage = stages::load(&stages_dir, stage_name)?.unwrap_or_else(|| {
                tracing::warn!("Stage '{stage_name}' has no stage file; starting it empty");
                StageRegistry::new(stage_name.clone())
            });
            if let Err(e) = workflow.add_stage(stage) {
                tracing::warn!("Skipping stage listed twice in workflow: {e}");
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            stagekit_dir,
            settings,
            workflow,
            store,
        })
    }

    /// Persist settings, the workflow, every stage and changed descriptors
    pub fn save(&mut self) -> Result<()> {
        self.settings.save(&self.stagekit_dir)?;
        self.settings.ensure_directories(&self.root)?;

        stages::save_manifest(&self.settings.data_path(&self.root), &self.workflow.manifest())?;

        let stages_dir = self.settings.stages_path(&self.root);
        for stage in self.workflow.stages() {
            stages::save(&stages_dir, stage)?;
        }

        let written =
            descriptors::save_dirty(&self.settings.descriptors_path(&self.root), &mut self.store)?;
        tracing::debug!(descriptors = written, "workspace saved");
        Ok(())
    }

    /// Add a stage to the workflow.
    ///
    /// A stage file left behind by an earlier removal is picked up again, so
    /// re-creating a stage restores its package list.
    pub fn create_stage(&mut self, name: &str) -> Result<&StageRegistry> {
        if self.workflow.contains_stage(name) {
            return Err(workspace::stage_exists(name));
        }

        let stage = match stages::load(&self.settings.stages_path(&self.root), name)? {
            Some(stage) => {
                tracing::debug!(stage = name, "reusing existing stage file");
                stage
            }
            None => StageRegistry::new(name),
        };
        self.workflow.add_stage(stage)?;
        self.workflow
            .stage(name)
            .ok_or_else(|| workspace::stage_not_found(name))
    }

    /// Drop a stage from the workflow. Its stage file stays on disk.
    pub fn remove_stage(&mut self, name: &str) -> Result<StageRegistry> {
        self.workflow
            .remove_stage(name)
            .ok_or_else(|| workspace::stage_not_found(name))
    }

    pub fn installer(&self) -> ProjectInstaller {
        ProjectInstaller::new(&self.root, &self.settings)
    }

    /// Scan the project for registered submodules and package assets
    pub fn project_state(&self) -> ProjectState {
        ProjectState::scan(
            &self.root,
            &Settings::resolve(&self.root, &self.settings.registry_manifest),
        )
    }
}
