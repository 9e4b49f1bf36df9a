use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a package:\n    stagekit show 3dtbd_Models")]
pub struct ShowArgs {
    /// Package name
    pub package: String,
}
