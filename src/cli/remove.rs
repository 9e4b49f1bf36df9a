use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a package from a stage:\n    stagekit remove Art Trees")]
pub struct RemoveArgs {
    /// Stage to remove the package from
    pub stage: String,

    /// Package name
    pub package: String,
}
