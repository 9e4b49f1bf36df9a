//! Init command implementation

use std::path::PathBuf;

use crate::error::{Result, fs};
use crate::workspace::{WORKSPACE_DIR, Workspace};

/// Run init command
pub fn run(workspace: Option<PathBuf>) -> Result<()> {
    let root = match workspace {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| fs::io_error(format!("Failed to get current directory: {e}")))?,
    };

    if Workspace::exists(&root) {
        println!(
            "Workspace already initialized at {}",
            root.join(WORKSPACE_DIR).display()
        );
        return Ok(());
    }

    let workspace = Workspace::init(&root)?;
    println!(
        "Initialized workflow '{}' in {}",
        workspace.workflow.name,
        workspace.stagekit_dir.display()
    );
    Ok(())
}
