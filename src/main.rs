//! stagekit - workflow stage package tracker
//!
//! Tracks which packages (local archives, git packages, registry packages)
//! each stage of a project workflow needs, reconciles that list against what
//! is available, and installs what is missing.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod git;
mod installer;
mod path_utils;
mod progress;
mod refresh;
mod registry;
mod workspace;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Environment variable holding the log filter
const LOG_ENV: &str = "STAGEKIT_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "stagekit=debug" } else { "stagekit=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(cli.workspace),
        Commands::Stage(args) => commands::stage::run(cli.workspace, args),
        Commands::Add(args) => commands::add::run(cli.workspace, args),
        Commands::Remove(args) => commands::remove::run(cli.workspace, args),
        Commands::Status(args) => commands::status::run(cli.workspace, args),
        Commands::Install(args) => commands::install::run(cli.workspace, args),
        Commands::InstallMissing(args) => commands::install_missing::run(cli.workspace, args),
        Commands::Show(args) => commands::show::run(cli.workspace, args),
        Commands::Watch(args) => commands::watch::run(cli.workspace, args),
        Commands::Config(args) => commands::config::run(cli.workspace, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
