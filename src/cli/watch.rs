use clap::Parser;

/// Arguments for the watch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Refresh until interrupted:\n    stagekit watch\n\n\
                  Stop after three refreshes:\n    stagekit watch --cycles 3")]
pub struct WatchArgs {
    /// Stop after this many completed refreshes
    #[arg(long)]
    pub cycles: Option<usize>,
}
