//! Command helper utilities

use std::path::PathBuf;
use std::time::Duration;

use console::Style;

use crate::domain::{ExternalState, PackageDescriptor};
use crate::error::Result;
use crate::refresh::Refresher;
use crate::workspace::Workspace;

const REFRESH_POLL: Duration = Duration::from_millis(20);

/// Polls allowed for a one-shot refresh (about 30 seconds)
const REFRESH_MAX_POLLS: usize = 1500;

/// Open the workspace named on the command line, or the nearest one above the
/// current directory
pub fn open_workspace(workspace: Option<PathBuf>) -> Result<Workspace> {
    let root = Workspace::locate(workspace)?;
    Workspace::open(&root)
}

/// Run one catalog refresh and reconcile every stage against it.
///
/// Returns the catalog, which is empty when the registry search timed out.
pub fn refresh_catalog(
    workspace: &mut Workspace,
    state: &dyn ExternalState,
) -> Result<Vec<PackageDescriptor>> {
    let mut refresher = Refresher::from_settings(&workspace.root, &workspace.settings);
    refresher.run_until_refreshed(
        &mut workspace.workflow,
        &workspace.store,
        state,
        REFRESH_POLL,
        REFRESH_MAX_POLLS,
    )?;
    Ok(refresher.catalog().to_vec())
}

pub fn heading(text: &str) -> String {
    Style::new().bold().yellow().apply_to(text).to_string()
}

pub fn label(text: &str) -> String {
    Style::new().bold().apply_to(text).to_string()
}

pub fn dim(text: &str) -> String {
    Style::new().dim().apply_to(text).to_string()
}
