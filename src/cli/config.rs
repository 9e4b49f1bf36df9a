use clap::{Parser, Subcommand};

/// Arguments for the config command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show all settings:\n    stagekit config show\n\n\
                  Read one setting:\n    stagekit config get git_timeout_secs\n\n\
                  Point the asset cache elsewhere:\n    stagekit config set asset_cache_dir /srv/assets\n\n\
                  Replace the known git packages:\n    stagekit config set known_git_uris git@github.com:org/a.git,git@github.com:org/b.git")]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print every setting
    Show,

    /// Print one setting
    Get {
        /// Setting name
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting name
        key: String,

        /// New value
        value: String,
    },
}
