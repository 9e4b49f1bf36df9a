use clap::{Parser, Subcommand};

/// Arguments for the stage command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Add a stage to the workflow:\n    stagekit stage create \"Level Design\"\n\n\
                  Remove a stage (its package list is kept on disk):\n    stagekit stage remove Audio\n\n\
                  List stages in workflow order:\n    stagekit stage list")]
pub struct StageArgs {
    #[command(subcommand)]
    pub command: StageSubcommand,
}

/// Stage subcommands
#[derive(Subcommand, Debug)]
pub enum StageSubcommand {
    /// Add a stage to the end of the workflow
    Create {
        /// Stage name
        name: String,
    },

    /// Remove a stage from the workflow
    Remove {
        /// Stage name
        name: String,
    },

    /// List stages in workflow order
    List,
}
