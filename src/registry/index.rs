//! JSON registry index
//!
//! The index is a JSON array of `{ "displayName", "id", "localPath" }`
//! records, the same shape a package manager's list request returns.

use std::path::PathBuf;

use crate::domain::{RegistryEntry, RegistrySource};
use crate::error::{Result, install};

/// Registry backed by an index file. Without a path the registry is empty.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    path: Option<PathBuf>,
}

impl RegistryIndex {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl RegistrySource for RegistryIndex {
    fn search(&self) -> Result<Vec<RegistryEntry>> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };

        let content = std::fs::read_to_string(path)
            .map_err(|e| install::search_failed(format!("{}: {e}", path.display())))?;
        let entries: Vec<RegistryEntry> = serde_json::from_str(&content)
            .map_err(|e| install::search_failed(format!("{}: {e}", path.display())))?;

        tracing::debug!(index = %path.display(), count = entries.len(), "registry index read");
        Ok(entries)
    }
}
