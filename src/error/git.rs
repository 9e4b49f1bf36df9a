//! Git operation errors

use super::StagekitError;

/// Creates an error from a git error line
pub fn command_failed(line: impl Into<String>) -> StagekitError {
    StagekitError::GitCommandFailed { line: line.into() }
}

/// Creates a git timeout error
pub fn timeout(uri: impl Into<String>, seconds: u64) -> StagekitError {
    StagekitError::GitTimeout {
        uri: uri.into(),
        seconds,
    }
}

/// Creates an error for a git executable that could not be started
pub fn spawn_failed(program: impl Into<String>, reason: impl Into<String>) -> StagekitError {
    StagekitError::GitSpawnFailed {
        program: program.into(),
        reason: reason.into(),
    }
}
