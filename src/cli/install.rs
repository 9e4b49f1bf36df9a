use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install one package of a stage:\n    stagekit install Art Trees")]
pub struct InstallArgs {
    /// Stage the package belongs to
    pub stage: String,

    /// Package name
    pub package: String,
}

/// Arguments for the install-missing command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install everything the Art stage still needs:\n    stagekit install-missing Art")]
pub struct InstallMissingArgs {
    /// Stage whose missing packages should be installed
    pub stage: String,
}
