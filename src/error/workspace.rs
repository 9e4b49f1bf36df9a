//! Workspace errors

use super::StagekitError;

/// Creates a workspace not found error
pub fn not_found(path: impl Into<String>) -> StagekitError {
    StagekitError::WorkspaceNotFound { path: path.into() }
}

/// Creates a stage not found error
pub fn stage_not_found(name: impl Into<String>) -> StagekitError {
    StagekitError::StageNotFound { name: name.into() }
}

/// Creates a duplicate stage error
pub fn stage_exists(name: impl Into<String>) -> StagekitError {
    StagekitError::StageAlreadyExists { name: name.into() }
}

/// Creates an error for a package that is not part of a stage
pub fn descriptor_not_found(name: impl Into<String>, stage: impl Into<String>) -> StagekitError {
    StagekitError::DescriptorNotFound {
        name: name.into(),
        stage: stage.into(),
    }
}

/// Creates an error for a package name missing from the catalog
pub fn not_in_catalog(name: impl Into<String>) -> StagekitError {
    StagekitError::PackageNotInCatalog { name: name.into() }
}
