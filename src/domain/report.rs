//! Non-fatal integrity warnings and batch install reports

use std::fmt;

use crate::error::StagekitError;

/// A data-quality problem found while reading or installing a stage.
///
/// Warnings are logged and collected, never raised as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// More than one project asset path matched a registry package's path fragment
    AmbiguousInstallMatch {
        name: String,
        fragment: String,
        matches: usize,
    },

    /// A stage referenced a descriptor that no longer exists in the store
    DanglingReference { name: String, stage: String },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::AmbiguousInstallMatch {
                name,
                fragment,
                matches,
            } => write!(
                f,
                "{matches} asset paths contain '{fragment}' (package '{name}'); treating it as installed"
            ),
            IntegrityWarning::DanglingReference { name, stage } => write!(
                f,
                "stage '{stage}' referenced missing package '{name}'; the entry was removed"
            ),
        }
    }
}

/// One failed install inside a batch
#[derive(Debug)]
pub struct InstallFailure {
    pub name: String,
    pub error: StagekitError,
}

/// Aggregate outcome of installing every missing package of a stage
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<InstallFailure>,
    pub warnings: Vec<IntegrityWarning>,
}

impl BatchReport {
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// True when nothing was attempted and nothing was dropped
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty() && self.warnings.is_empty()
    }
}
