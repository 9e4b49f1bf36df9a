//! Install-missing command implementation
//!
//! Installs every package of a stage that is not installed yet. One failing
//! package never stops the rest; the command only fails when the workspace
//! itself cannot be loaded or saved.

use std::path::PathBuf;

use console::Style;

use crate::cli::InstallMissingArgs;
use crate::commands::helpers::{label, open_workspace};
use crate::domain::BatchReport;
use crate::error::Result;
use crate::progress::ProgressDisplay;

/// Run install-missing command
pub fn run(workspace: Option<PathBuf>, args: InstallMissingArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;
    let state = workspace.project_state();
    let installer = workspace.installer();

    let stage = workspace.workflow.require_stage_mut(&args.stage)?;
    let missing = stage
        .descriptor_names()
        .iter()
        .filter(|name| {
            workspace
                .store
                .get(name)
                .is_some_and(|d| !d.is_installed(&state))
        })
        .count();

    let mut progress = ProgressDisplay::new(missing);
    let report = stage.install_all_missing_with(&mut workspace.store, &installer, &state, |name| {
        progress.start_package(name);
    });
    progress.finish();

    workspace.save()?;
    display_report(&args.stage, &report);
    Ok(())
}

fn display_report(stage: &str, report: &BatchReport) {
    if report.is_empty() {
        println!("Nothing to install in '{stage}'.");
        return;
    }

    let tick = Style::new().green().apply_to("✓");
    let cross = Style::new().red().apply_to("✗");
    let warn = Style::new().yellow().apply_to("!");

    for name in &report.succeeded {
        println!("  {tick} {name}");
    }
    for failure in &report.failed {
        println!("  {cross} {}: {}", failure.name, failure.error);
    }
    for warning in &report.warnings {
        println!("  {warn} {warning}");
    }

    println!();
    println!(
        "{} {} installed, {} failed",
        label(&format!("{stage}:")),
        report.success_count(),
        report.failure_count()
    );
}
