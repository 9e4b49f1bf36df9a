//! Git operations for git-hosted packages
//!
//! This module handles:
//! - Running the git executable with a timeout
//! - Adding a repository to the project as a submodule
//! - Listing the submodules a project already registers
//!
//! Submodule adds go through the git executable (configurable via the
//! `git_program` setting) so the user's own credentials, SSH keys and
//! helpers apply. Read-only queries use libgit2.

pub mod process;
pub mod submodule;

pub use submodule::{registered_urls, submodule_add};
