//! Error types and handling for stagekit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Settings and configuration errors
//! - [`git`]: Git operation errors
//! - [`install`]: Package installation errors
//! - [`workspace`]: Workspace, stage and descriptor lookup errors
//! - [`fs`]: File system errors
//!
//! Data-integrity problems (ambiguous install matches, dangling stage
//! entries) are not errors; see [`crate::domain::IntegrityWarning`].

pub mod config;
pub mod fs;
pub mod git;
pub mod install;
pub mod workspace;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for stagekit operations
#[derive(Error, Diagnostic, Debug)]
pub enum StagekitError {
    // Install errors
    #[error("Failed to install '{name}': {reason}")]
    #[diagnostic(
        code(stagekit::install::failed),
        help("The package was left as not installed. Fix the cause and run the install again")
    )]
    InstallFailed { name: String, reason: String },

    #[error("Failed to update registry manifest '{path}': {reason}")]
    #[diagnostic(code(stagekit::install::registry_manifest))]
    RegistryManifestFailed { path: String, reason: String },

    #[error("Registry search failed: {reason}")]
    #[diagnostic(
        code(stagekit::install::registry_search),
        help("Check the `registry_index` setting points at a readable JSON index")
    )]
    RegistrySearchFailed { reason: String },

    // Git errors
    #[error("Git error: {line}")]
    #[diagnostic(code(stagekit::git::command_failed))]
    GitCommandFailed { line: String },

    #[error("Git command for '{uri}' did not finish within {seconds}s")]
    #[diagnostic(
        code(stagekit::git::timeout),
        help("Raise `git_timeout_secs` with 'stagekit config set git_timeout_secs <n>'")
    )]
    GitTimeout { uri: String, seconds: u64 },

    #[error("Failed to start git ('{program}'): {reason}")]
    #[diagnostic(
        code(stagekit::git::spawn_failed),
        help("Set `git_program` to the path of your git executable")
    )]
    GitSpawnFailed { program: String, reason: String },

    // Workspace errors
    #[error("Workspace not found at: {path}")]
    #[diagnostic(
        code(stagekit::workspace::not_found),
        help("Run 'stagekit init' to create a workspace")
    )]
    WorkspaceNotFound { path: String },

    #[error("Workflow stage '{name}' not found")]
    #[diagnostic(
        code(stagekit::workspace::stage_not_found),
        help("Run 'stagekit stage list' to see the stages of this workflow")
    )]
    StageNotFound { name: String },

    #[error("There is already a workflow stage named '{name}'")]
    #[diagnostic(code(stagekit::workspace::stage_exists))]
    StageAlreadyExists { name: String },

    #[error("Package '{name}' is not part of stage '{stage}'")]
    #[diagnostic(code(stagekit::workspace::descriptor_not_found))]
    DescriptorNotFound { name: String, stage: String },

    #[error("Package '{name}' is not in the catalog")]
    #[diagnostic(
        code(stagekit::workspace::not_in_catalog),
        help("Run 'stagekit status' to see available packages, or pass --git, --path or --id")
    )]
    PackageNotInCatalog { name: String },

    // Configuration errors
    #[error("Failed to create directory '{path}': {reason}")]
    #[diagnostic(
        code(stagekit::config::dir_create_failed),
        help("Check the directory settings with 'stagekit config show'")
    )]
    ConfigDirCreateFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(stagekit::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(stagekit::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(stagekit::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Unknown setting: {key}")]
    #[diagnostic(
        code(stagekit::config::unknown_setting),
        help("Run 'stagekit config show' to list the available settings")
    )]
    UnknownSetting { key: String },

    // File system errors
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(stagekit::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(stagekit::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for StagekitError {
    fn from(err: std::io::Error) -> Self {
        StagekitError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StagekitError {
    fn from(err: serde_yaml::Error) -> Self {
        StagekitError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StagekitError {
    fn from(err: serde_json::Error) -> Self {
        StagekitError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for StagekitError {
    fn from(err: inquire::InquireError) -> Self {
        StagekitError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, StagekitError>;
