use clap::Parser;

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show every stage:\n    stagekit status\n\n\
                  Show one stage:\n    stagekit status Art\n\n\
                  Only packages whose name contains \"tree\":\n    stagekit status Art --filter tree")]
pub struct StatusArgs {
    /// Stage to show (all stages when omitted)
    pub stage: Option<String>,

    /// Only list packages whose name contains this text (case-insensitive)
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}
