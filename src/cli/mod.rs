//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - stage: Stage management arguments
//! - add / remove: Stage membership arguments
//! - status: Status display arguments
//! - install: Single and batch install arguments
//! - show: Show command arguments
//! - watch: Periodic refresh arguments
//! - config: Settings arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod completions;
pub mod config;
pub mod install;
pub mod remove;
pub mod show;
pub mod stage;
pub mod status;
pub mod watch;

pub use add::AddArgs;
pub use completions::CompletionsArgs;
pub use config::{ConfigArgs, ConfigSubcommand};
pub use install::{InstallArgs, InstallMissingArgs};
pub use remove::RemoveArgs;
pub use show::ShowArgs;
pub use stage::{StageArgs, StageSubcommand};
pub use status::StatusArgs;
pub use watch::WatchArgs;

/// stagekit - workflow stage package tracker
///
/// Track which packages each stage of a project workflow needs and install what is missing.
#[derive(Parser, Debug)]
#[command(
    name = "stagekit",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Track and install the packages each workflow stage needs",
    long_about = "stagekit keeps a per-stage list of packages (local archives, git packages, \
                  registry packages), reconciles it against what is available right now, \
                  and installs what is missing.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  stagekit init                        \x1b[90m# Create a workspace here\x1b[0m\n   \
                  stagekit stage create Art            \x1b[90m# Add a workflow stage\x1b[0m\n   \
                  stagekit add Art Trees               \x1b[90m# Add a catalog package to a stage\x1b[0m\n   \
                  stagekit status                      \x1b[90m# Installed / missing / available per stage\x1b[0m\n   \
                  stagekit install-missing Art         \x1b[90m# Install everything Art still needs\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace directory (defaults to the nearest workspace above the current directory)
    #[arg(long, short = 'w', global = true, env = "STAGEKIT_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a workspace in the project
    Init,

    /// Manage workflow stages
    Stage(StageArgs),

    /// Add a package to a stage
    Add(AddArgs),

    /// Remove a package from a stage
    Remove(RemoveArgs),

    /// Show installed, missing and available packages per stage
    Status(StatusArgs),

    /// Install one package of a stage
    Install(InstallArgs),

    /// Install every package a stage is missing
    #[command(name = "install-missing")]
    InstallMissing(InstallMissingArgs),

    /// Show package information
    Show(ShowArgs),

    /// Refresh the catalog periodically and report changes
    Watch(WatchArgs),

    /// Show or change settings
    Config(ConfigArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_init() {
        let cli = Cli::try_parse_from(["stagekit", "init"]).unwrap();
        assert!(matches!(cli.command, Commands::Init));
    }

    #[test]
    fn test_cli_parsing_stage_create() {
        let cli = Cli::try_parse_from(["stagekit", "stage", "create", "Level Design"]).unwrap();
        match cli.command {
            Commands::Stage(StageArgs {
                command: StageSubcommand::Create { name },
            }) => assert_eq!(name, "Level Design"),
            _ => panic!("Expected stage create"),
        }
    }

    #[test]
    fn test_cli_parsing_add_from_git() {
        let cli = Cli::try_parse_from([
            "stagekit",
            "add",
            "Art",
            "--git",
            "git@github.com:3dtbd/Models.git",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.stage, "Art");
                assert!(args.package.is_none());
                assert!(args.has_explicit_source());
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_add_sources_conflict() {
        let result = Cli::try_parse_from([
            "stagekit", "add", "Art", "--git", "git@h:a/b.git", "--id", "com.a@1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parsing_status_filter() {
        let cli = Cli::try_parse_from(["stagekit", "status", "Art", "-f", "tree"]).unwrap();
        match cli.command {
            Commands::Status(args) => {
                assert_eq!(args.stage.as_deref(), Some("Art"));
                assert_eq!(args.filter.as_deref(), Some("tree"));
            }
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_missing() {
        let cli = Cli::try_parse_from(["stagekit", "install-missing", "Art"]).unwrap();
        assert!(matches!(cli.command, Commands::InstallMissing(_)));
    }

    #[test]
    fn test_cli_parsing_config_set() {
        let cli =
            Cli::try_parse_from(["stagekit", "config", "set", "git_timeout_secs", "30"]).unwrap();
        match cli.command {
            Commands::Config(ConfigArgs {
                command: ConfigSubcommand::Set { key, value },
            }) => {
                assert_eq!(key, "git_timeout_secs");
                assert_eq!(value, "30");
            }
            _ => panic!("Expected config set"),
        }
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["stagekit", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli =
            Cli::try_parse_from(["stagekit", "-v", "-w", "/tmp/project", "stage", "list"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/project")));
    }

    #[test]
    fn test_cli_parsing_watch_cycles() {
        let cli = Cli::try_parse_from(["stagekit", "watch", "--cycles", "2"]).unwrap();
        match cli.command {
            Commands::Watch(args) => assert_eq!(args.cycles, Some(2)),
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["stagekit", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => assert_eq!(args.shell, "bash"),
            _ => panic!("Expected Completions command"),
        }
    }
}
