//! Show command implementation

use std::path::PathBuf;

use crate::cli::ShowArgs;
use crate::commands::helpers::{heading, label, open_workspace, refresh_catalog};
use crate::domain::{ExternalState, PackageDescriptor};
use crate::error::{Result, workspace as ws_err};
use crate::workspace::Workspace;

/// Run show command
///
/// Stored descriptors are shown as recorded. A package that no stage has
/// used yet is looked up in a freshly refreshed catalog.
pub fn run(workspace: Option<PathBuf>, args: ShowArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;
    let state = workspace.project_state();

    let descriptor = match workspace.store.get(&args.package) {
        Some(descriptor) => descriptor.clone(),
        None => refresh_catalog(&mut workspace, &state)?
            .into_iter()
            .find(|d| d.name == args.package)
            .ok_or_else(|| ws_err::not_in_catalog(&args.package))?,
    };

    display_descriptor(&workspace, &descriptor, &state);
    Ok(())
}

fn display_descriptor(workspace: &Workspace, descriptor: &PackageDescriptor, state: &dyn ExternalState) {
    println!("{}", heading(&descriptor.name));
    println!("  {} {}", label("Kind:"), descriptor.classify());
    println!("  {} {}", label("Location:"), descriptor.location_hint());
    println!(
        "  {} {}",
        label("Installed:"),
        if descriptor.is_installed(state) { "yes" } else { "no" }
    );

    if let Some(documentation) = &descriptor.documentation {
        println!("  {} {documentation}", label("Documentation:"));
    }
    if let Some(forum) = &descriptor.forum {
        println!("  {} {forum}", label("Forum:"));
    }
    if let Some(defines) = &descriptor.script_defines {
        println!("  {} {defines}", label("Script defines:"));
    }

    let stages: Vec<&str> = workspace
        .workflow
        .stages()
        .iter()
        .filter(|s| s.contains_name(&descriptor.name))
        .map(|s| s.name.as_str())
        .collect();
    if stages.is_empty() {
        println!("  {} none", label("Stages:"));
    } else {
        println!("  {} {}", label("Stages:"), stages.join(", "));
    }
}
