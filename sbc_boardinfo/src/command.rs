//! External command execution with a bounded wait.
//!
//! The command line is split on whitespace and executed directly (no shell).
//! Output is collected on helper threads so a chatty child cannot block on a
//! full pipe. On timeout the child receives SIGTERM, then SIGKILL, and is
//! reaped before returning. Collecting the output shares the same deadline:
//! a descendant that keeps the pipes open past it yields a timeout too.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, error, warn};

use sbc_common::consts::COMMAND_TIMEOUT_SECS;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const TERM_GRACE: Duration = Duration::from_millis(200);

/// Command execution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Empty command line or the program could not be started.
    #[error("failed to start '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// The command did not finish in time and was killed.
    #[error("'{command}' timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The command wrote to stderr.
    #[error("'{command}' failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// Run `cmdline` with the default timeout and return trimmed stdout.
pub fn execute(cmdline: &str) -> Result<String, CommandError> {
    execute_with_timeout(cmdline, Duration::from_secs(COMMAND_TIMEOUT_SECS))
}

/// Run `cmdline`, waiting at most `timeout`.
///
/// # Errors
/// - `CommandError::Spawn` if the line is empty or the program cannot start
/// - `CommandError::Timeout` if the child outlives `timeout`
/// - `CommandError::Failed` if the child wrote anything to stderr
pub fn execute_with_timeout(cmdline: &str, timeout: Duration) -> Result<String, CommandError> {
    let mut parts = cmdline.split_whitespace();
    let program = parts.next().ok_or_else(|| CommandError::Spawn {
        command: cmdline.to_string(),
        reason: "empty command line".to_string(),
    })?;

    let mut command = Command::new(program);
    command.args(parts);
    run(cmdline, command, timeout)
}

fn run(cmdline: &str, mut command: Command, timeout: Duration) -> Result<String, CommandError> {
    debug!("Executing '{}'", cmdline);
    let deadline = Instant::now() + timeout;
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            error!("Failed to start '{}': {}", cmdline, e);
            CommandError::Spawn {
                command: cmdline.to_string(),
                reason: e.to_string(),
            }
        })?;

    let stdout = collect(child.stdout.take());
    let stderr = collect(child.stderr.take());

    let timed_out = || CommandError::Timeout {
        command: cmdline.to_string(),
        timeout,
    };

    if !wait_until(&mut child, deadline) {
        warn!("'{}' timed out after {:?}, terminating", cmdline, timeout);
        terminate(&mut child);
        return Err(timed_out());
    }

    let (Some(stdout), Some(stderr)) = (receive(&stdout, deadline), receive(&stderr, deadline))
    else {
        warn!("'{}' exited but its output stayed open past {:?}", cmdline, timeout);
        return Err(timed_out());
    };

    if !stderr.trim().is_empty() {
        error!("'{}' reported: {}", cmdline, stderr.trim());
        return Err(CommandError::Failed {
            command: cmdline.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(stdout.trim().to_string())
}

/// Read `pipe` to the end on a detached thread.
fn collect<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut out = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut out);
        }
        let _ = tx.send(out);
    });
    rx
}

/// Output of a [`collect`] thread, or `None` once `deadline` passed.
fn receive(output: &Receiver<String>, deadline: Instant) -> Option<String> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    output.recv_timeout(remaining).ok()
}

/// Poll until the child exits or `deadline` passes. True if it exited.
fn wait_until(child: &mut Child, deadline: Instant) -> bool {
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return true,
            Ok(None) if Instant::now() >= deadline => return false,
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                warn!("Waiting for child {} failed: {}", child.id(), e);
                return false;
            }
        }
    }
}

/// SIGTERM, short grace period, then SIGKILL. Always reaps.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        let pid = Pid::from_raw(child.id() as i32);
        if signal::kill(pid, Signal::SIGTERM).is_ok()
            && wait_until(child, Instant::now() + TERM_GRACE)
        {
            return;
        }
    }

    if let Err(e) = child.kill() {
        debug!("Kill of child {} failed: {}", child.id(), e);
    }
    let _ = child.wait();
}
