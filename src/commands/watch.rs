//! Watch command implementation
//!
//! Drives the periodic refresh on the calling thread and prints a one-line
//! summary per stage every time a refresh completes.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::cli::WatchArgs;
use crate::commands::helpers::{dim, open_workspace};
use crate::domain::WorkflowRegistry;
use crate::error::Result;
use crate::refresh::Refresher;

const TICK: Duration = Duration::from_millis(100);

/// Run watch command
pub fn run(workspace: Option<PathBuf>, args: WatchArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;
    let mut refresher = Refresher::from_settings(&workspace.root, &workspace.settings);
    let mut state = workspace.project_state();

    println!(
        "Watching workflow '{}' every {}s (Ctrl-C to stop)",
        workspace.workflow.name,
        workspace.settings.refresh_interval_secs
    );

    loop {
        let now = Instant::now();
        if refresher.is_due(now) && refresher.completed() > 0 {
            state = workspace.project_state();
        }

        let refreshed = refresher
            .tick(now, &mut workspace.workflow, &workspace.store, &state)?
            .map(|catalog| catalog.len());

        if let Some(catalog_len) = refreshed {
            display_summary(&workspace.workflow, catalog_len, refresher.completed());
            if args.cycles.is_some_and(|cycles| refresher.completed() >= cycles) {
                return Ok(());
            }
        }

        std::thread::sleep(TICK);
    }
}

fn display_summary(workflow: &WorkflowRegistry, catalog_len: usize, cycle: usize) {
    println!("{}", dim(&format!("refresh #{cycle}: {catalog_len} package(s) in catalog")));
    for stage in workflow.stages() {
        println!(
            "  {}: {} of {} installed, {} missing, {} available",
            stage.name,
            stage.installed_count(),
            stage.len(),
            stage.not_installed_count(),
            stage.available().len()
        );
    }
}
