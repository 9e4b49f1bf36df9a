//! File system errors

use super::StagekitError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> StagekitError {
    StagekitError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> StagekitError {
    StagekitError::IoError {
        message: message.into(),
    }
}
