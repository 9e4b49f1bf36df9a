//! Project workflows: an ordered list of stages with unique names

use serde::{Deserialize, Serialize};

use super::capability::ExternalState;
use super::descriptor::PackageDescriptor;
use super::stage::StageRegistry;
use super::store::DescriptorStore;
use crate::error::{Result, workspace};

#[derive(Debug, Default, Clone)]
pub struct WorkflowRegistry {
    pub name: String,
    stages: Vec<StageRegistry>,
}

/// On-disk shape of a workflow: its name and the stage order
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WorkflowManifest {
    pub name: String,
    #[serde(default)]
    pub stages: Vec<String>,
}

impl WorkflowRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    pub fn stages(&self) -> &[StageRegistry] {
        &self.stages
    }

    pub fn contains_stage(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s.name == name)
    }

    pub fn stage(&self, name: &str) -> Option<&StageRegistry> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn stage_mut(&mut self, name: &str) -> Option<&mut StageRegistry> {
        self.stages.iter_mut().find(|s| s.name == name)
    }

    /// Look up a stage, failing with `StageNotFound`
    pub fn require_stage_mut(&mut self, name: &str) -> Result<&mut StageRegistry> {
        self.stage_mut(name)
            .ok_or_else(|| workspace::stage_not_found(name))
    }

    /// Append a stage; names must be unique within the workflow
    pub fn add_stage(&mut self, stage: StageRegistry) -> Result<()> {
        if self.contains_stage(&stage.name) {
            return Err(workspace::stage_exists(&stage.name));
        }
        self.stages.push(stage);
        Ok(())
    }

    pub fn remove_stage(&mut self, name: &str) -> Option<StageRegistry> {
        let pos = self.stages.iter().position(|s| s.name == name)?;
        Some(self.stages.remove(pos))
    }

    /// Reconcile every stage against the same catalog
    pub fn reconcile_all(
        &mut self,
        catalog: &[PackageDescriptor],
        store: &DescriptorStore,
        state: &dyn ExternalState,
    ) {
        for stage in &mut self.stages {
            stage.reconcile(catalog, store, state);
        }
    }

    pub fn manifest(&self) -> WorkflowManifest {
        WorkflowManifest {
            name: self.name.clone(),
            stages: self.stages.iter().map(|s| s.name.clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StagekitError;
    use crate::test_fixtures::FakeState;

    #[test]
    fn test_add_stage_rejects_duplicate_names() {
        let mut workflow = WorkflowRegistry::new("Game");
        workflow.add_stage(StageRegistry::new("Art")).unwrap();

        let err = workflow.add_stage(StageRegistry::new("Art")).unwrap_err();
        assert!(matches!(err, StagekitError::StageAlreadyExists { .. }));
        assert_eq!(workflow.stages().len(), 1);
    }

    #[test]
    fn test_contains_and_remove_stage() {
        let mut workflow = WorkflowRegistry::new("Game");
        workflow.add_stage(StageRegistry::new("Art")).unwrap();
        workflow.add_stage(StageRegistry::new("Audio")).unwrap();

        assert!(workflow.contains_stage("Audio"));
        assert!(workflow.remove_stage("Audio").is_some());
        assert!(!workflow.contains_stage("Audio"));
        assert!(workflow.remove_stage("Audio").is_none());
    }

    #[test]
    fn test_require_stage_mut_missing() {
        let mut workflow = WorkflowRegistry::new("Game");
        let err = workflow.require_stage_mut("Nope").unwrap_err();
        assert!(matches!(err, StagekitError::StageNotFound { .. }));
    }

    #[test]
    fn test_reconcile_all_delegates_to_each_stage() {
        let state = FakeState::default();
        let mut store = DescriptorStore::new();
        let mut workflow = WorkflowRegistry::new("Game");
        let mut art = StageRegistry::new("Art");
        art.add(PackageDescriptor::new("A"), &mut store, &state);
        workflow.add_stage(art).unwrap();
        workflow.add_stage(StageRegistry::new("Audio")).unwrap();

        let catalog = vec![PackageDescriptor::new("A"), PackageDescriptor::new("B")];
        workflow.reconcile_all(&catalog, &store, &state);

        let art = workflow.stage("Art").unwrap();
        assert_eq!(art.available().len(), 1);
        let audio = workflow.stage("Audio").unwrap();
        assert_eq!(audio.available().len(), 2);
    }

    #[test]
    fn test_manifest_keeps_stage_order() {
        let mut workflow = WorkflowRegistry::new("Game");
        for name in ["Design", "Art", "Audio"] {
            workflow.add_stage(StageRegistry::new(name)).unwrap();
        }
        assert_eq!(workflow.manifest().stages, vec!["Design", "Art", "Audio"]);
    }
}
