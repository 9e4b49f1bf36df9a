use clap::Parser;

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Add a catalog package by name:\n    stagekit add Art Trees\n\n\
                  Pick a catalog package interactively:\n    stagekit add Art\n\n\
                  Add a git package:\n    stagekit add Art --git git@github.com:3dtbd/Models.git\n\n\
                  Add a local archive:\n    stagekit add Art --path ~/Downloads/Rocks.unitypackage\n\n\
                  Add a registry package:\n    stagekit add Audio \"Audio Tools\" --id com.studio.audio@1.2.0")]
pub struct AddArgs {
    /// Stage to add the package to
    pub stage: String,

    /// Package name (catalog name, or display name with --id)
    pub package: Option<String>,

    /// Git repository URI of the package
    #[arg(long, conflicts_with_all = ["path", "id"])]
    pub git: Option<String>,

    /// Path to a package archive, relative to the project root
    #[arg(long, conflicts_with = "id")]
    pub path: Option<String>,

    /// Registry package id (name@version)
    #[arg(long)]
    pub id: Option<String>,
}

impl AddArgs {
    /// Whether the package is described explicitly rather than taken from the catalog
    pub fn has_explicit_source(&self) -> bool {
        self.git.is_some() || self.path.is_some() || self.id.is_some()
    }
}
