//! Install command implementation

use std::path::PathBuf;

use crate::cli::InstallArgs;
use crate::commands::helpers::open_workspace;
use crate::error::{Result, workspace as ws_err};

/// Run install command
pub fn run(workspace: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;

    let stage = workspace.workflow.require_stage_mut(&args.stage)?;
    if !stage.contains_name(&args.package) {
        return Err(ws_err::descriptor_not_found(&args.package, &args.stage));
    }

    let state = workspace.project_state();
    let installer = workspace.installer();

    let Some(descriptor) = workspace.store.get_mut(&args.package) else {
        return Err(ws_err::descriptor_not_found(&args.package, &args.stage));
    };
    if descriptor.is_installed(&state) {
        println!("'{}' is already installed", args.package);
        return Ok(());
    }

    let kind = descriptor.classify();
    let result = descriptor.install(&installer);

    // The local-asset flag changes even when the import fails.
    workspace.save()?;
    result?;

    println!("Installed '{}' ({kind})", args.package);
    Ok(())
}
