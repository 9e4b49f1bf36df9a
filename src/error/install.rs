//! Package installation errors

use super::StagekitError;

/// Creates an install failed error
pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> StagekitError {
    StagekitError::InstallFailed {
        name: name.into(),
        reason: reason.into(),
    }
}

/// Creates a registry manifest update error
pub fn manifest_failed(path: impl Into<String>, reason: impl Into<String>) -> StagekitError {
    StagekitError::RegistryManifestFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a registry search error
pub fn search_failed(reason: impl Into<String>) -> StagekitError {
    StagekitError::RegistrySearchFailed {
        reason: reason.into(),
    }
}
