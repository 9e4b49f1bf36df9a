//! Stage command implementation

use std::path::PathBuf;

use crate::cli::{StageArgs, StageSubcommand};
use crate::commands::helpers::{dim, open_workspace};
use crate::error::Result;

/// Run stage command
pub fn run(workspace: Option<PathBuf>, args: StageArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;

    match args.command {
        StageSubcommand::Create { name } => {
            let stage = workspace.create_stage(&name)?;
            let packages = stage.len();
            workspace.save()?;
            if packages > 0 {
                println!("Created stage '{name}' ({packages} package(s) restored)");
            } else {
                println!("Created stage '{name}'");
            }
        }
        StageSubcommand::Remove { name } => {
            workspace.remove_stage(&name)?;
            workspace.save()?;
            println!("Removed stage '{name}'");
        }
        StageSubcommand::List => {
            let stages = workspace.workflow.stages();
            if stages.is_empty() {
                println!("No stages in workflow '{}'.", workspace.workflow.name);
                return Ok(());
            }
            println!("Stages of workflow '{}':", workspace.workflow.name);
            for (i, stage) in stages.iter().enumerate() {
                println!(
                    "  {}. {} {}",
                    i + 1,
                    stage.name,
                    dim(&format!("({} package(s))", stage.len()))
                );
            }
        }
    }

    Ok(())
}
