//! Remove command implementation

use std::path::PathBuf;

use crate::cli::RemoveArgs;
use crate::commands::helpers::open_workspace;
use crate::error::{Result, workspace as ws_err};

/// Run remove command
pub fn run(workspace: Option<PathBuf>, args: RemoveArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;

    let stage = workspace.workflow.require_stage_mut(&args.stage)?;
    if stage.remove(&args.package, &workspace.store) == 0 {
        return Err(ws_err::descriptor_not_found(&args.package, &args.stage));
    }
    workspace.save()?;

    println!("Removed '{}' from stage '{}'", args.package, args.stage);
    Ok(())
}
