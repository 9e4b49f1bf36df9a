//! Submodule registration: adding git packages and listing what is present

use std::path::Path;
use std::time::Duration;

use git2::{Config, Repository};

use super::process::run_with_timeout;
use crate::error::{Result, fs, git};

/// Informational line git prints to stderr while cloning
const CLONING_PREFIX: &str = "Cloning into";

const GITMODULES_FILE: &str = ".gitmodules";

/// Add `uri` as a submodule of the repository containing `workdir`.
///
/// `workdir` is created if needed. The command fails when git's first error
/// line is anything but the `Cloning into` progress note, or when git exits
/// unsuccessfully. Returns git's standard output.
pub fn submodule_add(program: &str, uri: &str, workdir: &Path, timeout: Duration) -> Result<String> {
    std::fs::create_dir_all(workdir).map_err(|e| {
        fs::io_error(format!(
            "Failed to create git install directory {}: {e}",
            workdir.display()
        ))
    })?;

    let output = run_with_timeout(program, &["submodule", "add", uri], workdir, timeout)?;

    if output.timed_out {
        return Err(git::timeout(uri, timeout.as_secs()));
    }

    if let Some(line) = output.first_error_line() {
        if !line.starts_with(CLONING_PREFIX) {
            return Err(git::command_failed(line));
        }
    }

    if !output.status.success() {
        let line = output
            .stderr
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with(CLONING_PREFIX))
            .map(str::to_string)
            .unwrap_or_else(|| format!("submodule add exited with {}", output.status));
        return Err(git::command_failed(line));
    }

    Ok(output.stdout)
}

/// URLs of every submodule registered in the project at `root`.
///
/// Combines libgit2's submodule listing with the raw `.gitmodules` entries,
/// so a project that is not (yet) a repository still reports what its
/// `.gitmodules` declares.
pub fn registered_urls(root: &Path) -> Vec<String> {
    let mut urls = Vec::new();

    match Repository::open(root) {
        Ok(repo) => match repo.submodules() {
            Ok(submodules) => {
                urls.extend(submodules.iter().filter_map(|s| s.url().map(str::to_string)));
            }
            Err(e) => tracing::debug!("Could not list submodules: {e}"),
        },
        Err(e) => tracing::debug!("No git repository at {}: {e}", root.display()),
    }

    for url in gitmodules_urls(&root.join(GITMODULES_FILE)) {
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    urls
}

fn gitmodules_urls(path: &Path) -> Vec<String> {
    if !path.is_file() {
        return Vec::new();
    }

    let config = match Config::open(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Could not read {}: {e}", path.display());
            return Vec::new();
        }
    };

    let mut urls = Vec::new();
    if let Ok(mut entries) = config.entries(Some(r"submodule\..*\.url")) {
        while let Some(Ok(entry)) = entries.next() {
            if let Some(value) = entry.value() {
                urls.push(value.to_string());
            }
        }
    }
    urls
}
