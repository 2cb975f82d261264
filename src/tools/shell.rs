//! Shell command execution with live output streaming.

use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::{sleep_until, timeout_at, Instant};

use super::{str_arg, ToolError};

/// Wall-clock budget for one shell command.
pub const BASH_TIMEOUT: Duration = Duration::from_secs(30);

/// Run a shell command, echoing each output line to the terminal as it
/// arrives.
pub async fn bash(args: &Value) -> Result<String, ToolError> {
    let cmd = str_arg(args, "cmd")?;
    run_command(cmd, BASH_TIMEOUT, |line| println!("  │ {line}")).await
}

/// Run `cmd` under `sh -c`, merging stdout and stderr by arrival order.
///
/// Each line is passed to `observe` as it arrives so callers can stream
/// output while the command runs. The budget is wall-clock from spawn and
/// covers both the read loop and the final wait; a child that has not
/// terminated by the deadline is killed and a timeout marker is appended to
/// whatever output was collected. An empty output becomes `(Empty)` so the
/// completion service never receives a blank tool result.
pub async fn run_command(
    cmd: &str,
    timeout: Duration,
    mut observe: impl FnMut(&str),
) -> Result<String, ToolError> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("stdout not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("stderr not captured"))?;
    let mut out_lines = BufReader::new(stdout).lines();
    let mut err_lines = BufReader::new(stderr).lines();

    let deadline = Instant::now() + timeout;
    let mut collected: Vec<String> = Vec::new();
    let mut out_open = true;
    let mut err_open = true;
    let mut timed_out = false;

    while out_open || err_open {
        tokio::select! {
            line = out_lines.next_line(), if out_open => match line? {
                Some(l) => {
                    observe(&l);
                    collected.push(l);
                }
                None => out_open = false,
            },
            line = err_lines.next_line(), if err_open => match line? {
                Some(l) => {
                    observe(&l);
                    collected.push(l);
                }
                None => err_open = false,
            },
            _ = sleep_until(deadline) => {
                timed_out = true;
                break;
            }
        }
    }

    // The deadline also bounds the final wait: a child that closes its pipes
    // but keeps running still gets killed at the budget
    if !timed_out {
        match timeout_at(deadline, child.wait()).await {
            Ok(status) => {
                status?;
            }
            Err(_) => timed_out = true,
        }
    }
    if timed_out {
        child.start_kill()?;
        let _ = child.wait().await;
        collected.push(format!("(Timed out after {}s)", timeout.as_secs()));
    }

    let output = collected.join("\n").trim().to_string();
    if output.is_empty() {
        Ok("(Empty)".to_string())
    } else {
        Ok(output)
    }
}
