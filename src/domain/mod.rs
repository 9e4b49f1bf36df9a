//! Domain models for stagekit
//!
//! This module contains the package-state reconciliation model: descriptors,
//! stages, workflows, and the capability traits they use to reach the
//! outside world. Nothing here touches the file system or spawns processes.

pub mod capability;
pub mod descriptor;
pub mod report;
pub mod stage;
pub mod store;
pub mod workflow;

pub use capability::{ExternalState, Installer, RegistrySource};
pub use descriptor::{DescriptorProfile, PackageDescriptor, PackageKind, RegistryEntry};
pub use report::{BatchReport, IntegrityWarning};
pub use stage::StageRegistry;
pub use store::DescriptorStore;
pub use workflow::{WorkflowManifest, WorkflowRegistry};
