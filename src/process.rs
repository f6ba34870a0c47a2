//! External command execution bounded by a timeout.
//!
//! Every command gets exactly one attempt. stdin is closed so an interactive
//! tool cannot hang the run waiting for input.

use crate::constants::{INSTALL_TIMEOUT, POLL_INTERVAL};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// Non-zero exit, `None` when terminated by a signal.
    Failed(Option<i32>),
    /// Killed after running past its timeout.
    TimedOut,
}

fn render(program: &str, args: &[&str]) -> String {
    std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ")
}

/// Runs `program` in `cwd`, killing it once `timeout` has elapsed.
///
/// # Errors
/// * `Error::SubprocessError` if the program cannot be started or waited on
pub fn run_command<P: AsRef<Path>>(
    program: &str,
    args: &[&str],
    cwd: P,
    timeout: Duration,
) -> Result<CommandStatus> {
    let command_line = render(program, args);
    debug!("Running '{}' in '{}'", command_line, cwd.as_ref().display());

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd.as_ref())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| Error::SubprocessError {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => return Ok(CommandStatus::Success),
            Ok(Some(status)) => return Ok(CommandStatus::Failed(status.code())),
            Ok(None) => {
                if start.elapsed() > timeout {
                    warn!("'{}' timed out after {}s, terminating", command_line, timeout.as_secs());
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok(CommandStatus::TimedOut);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(Error::SubprocessError {
                    command: command_line,
                    reason: format!("failed to wait for process: {}", e),
                })
            }
        }
    }
}

/// Runs `yarn install` in the workspace root.
///
/// Installation is best effort: a failure is reported as a warning with the
/// manual command to run, never as an error.
pub fn install_dependencies<P: AsRef<Path>>(root: P, skip: bool) -> Option<String> {
    let root = root.as_ref();
    if skip {
        info!("Skipping dependency installation");
        return None;
    }

    info!("Installing dependencies...");
    let outcome = run_command("yarn", &["install"], root, INSTALL_TIMEOUT);
    let reason = match outcome {
        Ok(CommandStatus::Success) => return None,
        Ok(CommandStatus::Failed(code)) => format!("exited with {:?}", code),
        Ok(CommandStatus::TimedOut) => format!("timed out after {}s", INSTALL_TIMEOUT.as_secs()),
        Err(e) => e.to_string(),
    };
    let warning = format!(
        "Dependency installation failed ({}). Run 'yarn install' in {} manually.",
        reason,
        root.display()
    );
    warn!("{}", warning);
    Some(warning)
}
