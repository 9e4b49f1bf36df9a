//! Status command implementation
//!
//! Refreshes the catalog, then prints each stage's installed, not installed
//! and available packages.

use std::path::PathBuf;

use console::Style;

use crate::cli::StatusArgs;
use crate::commands::helpers::{dim, heading, label, open_workspace, refresh_catalog};
use crate::domain::StageRegistry;
use crate::error::{Result, workspace as ws_err};

/// Run status command
pub fn run(workspace: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;
    if let Some(name) = &args.stage {
        if !workspace.workflow.contains_stage(name) {
            return Err(ws_err::stage_not_found(name));
        }
    }

    let state = workspace.project_state();
    refresh_catalog(&mut workspace, &state)?;

    let stages: Vec<&StageRegistry> = workspace
        .workflow
        .stages()
        .iter()
        .filter(|s| args.stage.as_ref().is_none_or(|name| &s.name == name))
        .collect();

    if stages.is_empty() {
        println!("No stages in workflow '{}'.", workspace.workflow.name);
        return Ok(());
    }

    for stage in stages {
        display_stage(stage, args.filter.as_deref());
        println!();
    }
    Ok(())
}

fn display_stage(stage: &StageRegistry, filter: Option<&str>) {
    println!(
        "{} {}",
        heading(&stage.name),
        dim(&format!(
            "({} of {} installed)",
            stage.installed_count(),
            stage.len()
        ))
    );

    let view = stage.matching(filter);
    let tick = Style::new().green().apply_to("✓");
    let cross = Style::new().red().apply_to("✗");

    println!("  {}", label(&format!("Installed ({}):", view.installed.len())));
    for name in &view.installed {
        println!("    {tick} {name}");
    }

    println!(
        "  {}",
        label(&format!("Not installed ({}):", view.not_installed.len()))
    );
    for name in &view.not_installed {
        println!("    {cross} {name}");
    }

    println!(
        "  {}",
        label(&format!("Available ({}):", view.available.len()))
    );
    for descriptor in &view.available {
        println!(
            "    - {} {}",
            descriptor.name,
            dim(&format!("[{}]", descriptor.classify()))
        );
    }
}
