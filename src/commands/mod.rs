//! Command implementations for the stagekit CLI

pub mod add;
pub mod completions;
pub mod config;
pub mod helpers;
pub mod init;
pub mod install;
pub mod install_missing;
pub mod remove;
pub mod show;
pub mod stage;
pub mod status;
pub mod version;
pub mod watch;
