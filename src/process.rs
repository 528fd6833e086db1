//! Running an external search tool as a child process.
//!
//! Stdout and stderr go to files in the caller's scratch directory so a
//! chatty tool can never block on a full pipe while we wait for it.
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::common::SeqMapError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// What a finished tool run left behind.
#[derive(Clone, Debug)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Result of [`run_tool`].
#[derive(Clone, Debug)]
pub enum RunOutcome {
    /// The tool exited successfully.
    Finished(ToolOutput),
    /// The tool was killed after exceeding the time limit.
    TimedOut,
}

/// Short display name of a program path (its file name).
pub fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// Run `program args...`, waiting at most `timeout` when one is given.
///
/// ## Errors
/// [`SeqMapError::SearchExecution`] if the tool cannot be started or exits
/// with a non-zero status; [`SeqMapError::Io`] for scratch file problems.
pub fn run_tool<I, S>(
    program: &Path,
    args: I,
    scratch: &Path,
    timeout: Option<Duration>,
) -> Result<RunOutcome, SeqMapError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let name = tool_name(program);
    let stdout_path = scratch.join(format!("{}.stdout", name));
    let stderr_path = scratch.join(format!("{}.stderr", name));
    let stdout = File::create(&stdout_path).map_err(|e| SeqMapError::io("create", &stdout_path, e))?;
    let stderr = File::create(&stderr_path).map_err(|e| SeqMapError::io("create", &stderr_path, e))?;

    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null()).stdout(stdout).stderr(stderr);
    tracing::debug!(command = ?cmd, "running search tool");

    let mut child = cmd
        .spawn()
        .map_err(|e| SeqMapError::search(&name, format!("could not execute '{}': {}", program.display(), e)))?;

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(e) => return Err(SeqMapError::search(&name, format!("waiting for process: {}", e))),
        }
        if let Some(limit) = timeout {
            if started.elapsed() >= limit {
                // the child may have exited in the meantime; either way reap it
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(tool = %name, limit = ?limit, "search tool timed out and was killed");
                return Ok(RunOutcome::TimedOut);
            }
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    let stdout = read_lossy(&stdout_path)?;
    let stderr = read_lossy(&stderr_path)?;
    if !status.success() {
        let detail = if !stderr.trim().is_empty() {
            stderr.trim().to_string()
        } else if !stdout.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            format!("exit status {}", status)
        };
        return Err(SeqMapError::search(&name, detail));
    }
    Ok(RunOutcome::Finished(ToolOutput { stdout, stderr }))
}

fn read_lossy(path: &Path) -> Result<String, SeqMapError> {
    let bytes = std::fs::read(path).map_err(|e| SeqMapError::io("read", path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
