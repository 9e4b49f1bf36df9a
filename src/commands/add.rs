//! Add command implementation
//!
//! Adds a package to a stage, either by catalog name, from an explicit
//! source (`--git`, `--path`, `--id`), or picked interactively from the
//! catalog when neither is given.

use std::path::PathBuf;

use inquire::Select;

use crate::cli::AddArgs;
use crate::commands::helpers::{open_workspace, refresh_catalog};
use crate::config::Settings;
use crate::domain::descriptor::split_registry_id;
use crate::domain::{PackageDescriptor, RegistryEntry};
use crate::error::{Result, workspace as ws_err};
use crate::workspace::Workspace;

/// Run add command
pub fn run(workspace: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;
    if !workspace.workflow.contains_stage(&args.stage) {
        return Err(ws_err::stage_not_found(&args.stage));
    }

    let state = workspace.project_state();

    let descriptor = if args.has_explicit_source() {
        explicit_descriptor(&workspace, &args)
    } else {
        let catalog = refresh_catalog(&mut workspace, &state)?;
        match &args.package {
            Some(name) => catalog
                .into_iter()
                .find(|d| &d.name == name)
                .ok_or_else(|| ws_err::not_in_catalog(name))?,
            None => match select_from_catalog(&workspace, &args.stage, catalog)? {
                Some(descriptor) => descriptor,
                None => return Ok(()),
            },
        }
    };

    let name = descriptor.name.clone();
    let stage = workspace.workflow.require_stage_mut(&args.stage)?;
    let appended = stage.add(descriptor, &mut workspace.store, &state);
    workspace.save()?;

    if appended {
        println!("Added '{name}' to stage '{}'", args.stage);
    } else {
        println!("'{name}' is already in stage '{}'", args.stage);
    }
    Ok(())
}

fn explicit_descriptor(workspace: &Workspace, args: &AddArgs) -> PackageDescriptor {
    let mut descriptor = if let Some(uri) = &args.git {
        PackageDescriptor::from_git_uri(uri)
    } else if let Some(path) = &args.path {
        // Relative paths are project-relative, whatever directory we run from
        let path = Settings::resolve(&workspace.root, path);
        PackageDescriptor::from_local_path(&path, &workspace.settings.profiles)
    } else {
        let id = args.id.clone().unwrap_or_default();
        let display_name = args
            .package
            .clone()
            .unwrap_or_else(|| split_registry_id(&id).0.to_string());
        PackageDescriptor::from_registry_entry(&RegistryEntry {
            display_name,
            id,
            local_path: None,
        })
    };

    if let Some(name) = &args.package {
        descriptor.name.clone_from(name);
    }
    descriptor
}

fn select_from_catalog(
    workspace: &Workspace,
    stage_name: &str,
    catalog: Vec<PackageDescriptor>,
) -> Result<Option<PackageDescriptor>> {
    let stage = workspace.workflow.stage(stage_name);
    let candidates: Vec<PackageDescriptor> = catalog
        .into_iter()
        .filter(|d| stage.is_none_or(|s| !s.contains_name(&d.name)))
        .collect();

    if candidates.is_empty() {
        println!("No catalog packages left to add to '{stage_name}'.");
        return Ok(None);
    }

    let items: Vec<String> = candidates
        .iter()
        .map(|d| format!("{} ({})", d.name, d.classify()))
        .collect();

    let Some(selection) = Select::new(&format!("Select package to add to '{stage_name}'"), items.clone())
        .with_page_size(10)
        .with_help_message("↑↓ to move, type to filter, ENTER to select, ESC to cancel")
        .prompt_skippable()?
    else {
        return Ok(None);
    };

    Ok(items
        .iter()
        .position(|item| *item == selection)
        .and_then(|i| candidates.into_iter().nth(i)))
}
