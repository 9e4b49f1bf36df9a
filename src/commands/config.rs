//! Config command implementation

use std::path::PathBuf;

use crate::cli::{ConfigArgs, ConfigSubcommand};
use crate::commands::helpers::{dim, label, open_workspace};
use crate::config::KEYS;
use crate::error::Result;

/// Run config command
pub fn run(workspace: Option<PathBuf>, args: ConfigArgs) -> Result<()> {
    let mut workspace = open_workspace(workspace)?;

    match args.command {
        ConfigSubcommand::Show => {
            for key in KEYS {
                let value = workspace.settings.get(key)?;
                if value.is_empty() {
                    println!("{} {}", label(&format!("{key}:")), dim("(unset)"));
                } else {
                    println!("{} {value}", label(&format!("{key}:")));
                }
            }
        }
        ConfigSubcommand::Get { key } => {
            println!("{}", workspace.settings.get(&key)?);
        }
        ConfigSubcommand::Set { key, value } => {
            workspace.settings.set(&key, &value)?;
            workspace.settings.ensure_directories(&workspace.root)?;
            workspace.settings.save(&workspace.stagekit_dir)?;
            println!("{key} = {}", workspace.settings.get(&key)?);
        }
    }

    Ok(())
}
