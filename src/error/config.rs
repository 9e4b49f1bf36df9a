//! Configuration errors

use super::StagekitError;

/// Creates a directory creation failed error
pub fn dir_create_failed(path: impl Into<String>, reason: impl Into<String>) -> StagekitError {
    StagekitError::ConfigDirCreateFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> StagekitError {
    StagekitError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> StagekitError {
    StagekitError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> StagekitError {
    StagekitError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an unknown setting error
pub fn unknown_setting(key: impl Into<String>) -> StagekitError {
    StagekitError::UnknownSetting { key: key.into() }
}
