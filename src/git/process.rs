//! Running the git executable with a deadline
//!
//! Output pipes are drained on their own threads so a chatty child can
//! never fill a pipe and stall while we wait on it. On unix the child leads
//! its own process group, and a timeout kills the whole group, so helpers
//! git spawns (`git clone`, `ssh`, remote helpers) die with it.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, fs, git};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long to wait for pipe readers once the child is gone
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Captured result of a finished (or killed) process
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ProcessOutput {
    /// First non-blank line written to standard error
    pub fn first_error_line(&self) -> Option<&str> {
        self.stderr
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Run `program args...` in `workdir`, killing it once `timeout` elapses
pub fn run_with_timeout(
    program: &str,
    args: &[&str],
    workdir: &Path,
    timeout: Duration,
) -> Result<ProcessOutput> {
    tracing::debug!(program, ?args, workdir = %workdir.display(), "spawning");

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command
        .spawn()
        .map_err(|e| git::spawn_failed(program, e.to_string()))?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let started = Instant::now();
    let mut timed_out = false;
    let status = loop {
        if let Some(status) = child
            .try_wait()
            .map_err(|e| fs::io_error(format!("Failed to wait for {program}: {e}")))?
        {
            break status;
        }
        if started.elapsed() >= timeout {
            timed_out = true;
            kill_tree(&mut child);
            break child
                .wait()
                .map_err(|e| fs::io_error(format!("Failed to reap {program}: {e}")))?;
        }
        thread::sleep(POLL_INTERVAL);
    };

    // Something outside the group may still hold a pipe; never wait past the deadline for it.
    let wait = if timed_out {
        DRAIN_GRACE
    } else {
        timeout.saturating_sub(started.elapsed()).max(DRAIN_GRACE)
    };
    let stdout = stdout.recv_timeout(wait).unwrap_or_default();
    let stderr = stderr.recv_timeout(wait).unwrap_or_default();

    Ok(ProcessOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        timed_out,
    })
}

/// Read a pipe to its end on a background thread
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send(buf);
    });
    rx
}

#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    if let Ok(pid) = i32::try_from(child.id()) {
        // SAFETY: plain kill(2) on the process group created for this child.
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}
