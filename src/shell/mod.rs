//! Shell command execution.
//!
//! Every task talks to the environment through this boundary: external
//! commands run synchronously, inherit the controlling terminal for operator
//! visibility, and turn a nonzero exit into a propagated
//! [`OutfitterError::CommandFailed`]. There is no retry, no timeout, and no
//! cancellation; a hanging child blocks the run.
//!
//! [`run`] tokenizes the command string with `shlex` and executes it as an
//! argument vector, so shell metacharacters are inert. [`run_shell`] hands
//! the literal string to `sh -c` for the rare step that needs redirection or
//! pipes. [`capture`] is for read-only completion probes that need stdout.

pub mod dir;

pub use dir::{with_dir, DirGuard};

use std::path::Path;
use std::process::Command;

use crate::error::{OutfitterError, Result};

/// Quote a value for interpolation into a command string, so [`run`]
/// tokenizes it back into a single argument even when it contains spaces.
pub fn quote(value: &str) -> String {
    shlex::try_quote(value)
        .map(|quoted| quoted.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// [`quote`] for paths.
pub fn quote_path(path: &Path) -> String {
    quote(&path.display().to_string())
}

/// Tokenize a command string respecting quoting rules.
fn tokenize(command: &str) -> Result<Vec<String>> {
    let argv = shlex::split(command).ok_or_else(|| OutfitterError::CommandParse {
        command: command.to_string(),
    })?;
    if argv.is_empty() {
        return Err(OutfitterError::CommandParse {
            command: command.to_string(),
        });
    }
    Ok(argv)
}

fn check_status(command: &str, status: std::process::ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(OutfitterError::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        })
    }
}

/// Run a command as an argument vector, inheriting stdio.
///
/// Shell metacharacters are not interpreted; use [`run_shell`] when a step
/// genuinely needs them.
pub fn run(command: &str) -> Result<()> {
    let argv = tokenize(command)?;
    tracing::debug!("exec: {}", command);

    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .status()
        .map_err(|e| OutfitterError::CommandSpawn {
            command: command.to_string(),
            source: e,
        })?;

    check_status(command, status)
}

/// Run a literal command string through `sh -c`.
pub fn run_shell(command: &str) -> Result<()> {
    tracing::debug!("exec (shell): {}", command);

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|e| OutfitterError::CommandSpawn {
            command: command.to_string(),
            source: e,
        })?;

    check_status(command, status)
}

/// Run a command as an argument vector and capture stdout.
///
/// Intended for completion probes (`conda list`, `pip list`); stderr is
/// captured too so probe noise stays off the operator's terminal.
pub fn capture(command: &str) -> Result<String> {
    let argv = tokenize(command)?;
    tracing::debug!("probe: {}", command);

    let output = Command::new(&argv[0])
        .args(&argv[1..])
        .output()
        .map_err(|e| OutfitterError::CommandSpawn {
            command: command.to_string(),
            source: e,
        })?;

    check_status(command, output.status)?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
