//! Emitting or executing built commands.
//!
//! In print mode each command is written to the output sink, one per line.
//! In execute mode it is handed to the configured shell exactly once; a
//! failing command is logged and reported as a [`RunOutcome`], never as an
//! error, so the caller can carry on with the next one.

use std::io::Write;
use std::process::Command;

use tracing::{debug, error, info};

use crate::constants;
use crate::error::Result;

/// What happened to a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Written to the output sink (print mode).
    Printed,
    /// Shell exited with status 0.
    Succeeded,
    /// Shell exited non-zero or was killed by a signal (`code` is `None`).
    Failed { code: Option<i32>, stderr: String },
    /// The shell itself could not be started.
    SpawnFailed(String),
}

impl RunOutcome {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::SpawnFailed(_))
    }
}

/// Prints or executes commands.
pub struct Runner<W: Write> {
    out: W,
    execute: bool,
    shell: String,
}

impl<W: Write> Runner<W> {
    /// `execute = false` prints to `out`; `true` runs through `shell -c`.
    pub fn new(out: W, execute: bool, shell: impl Into<String>) -> Self {
        Self {
            out,
            execute,
            shell: shell.into(),
        }
    }

    #[must_use]
    pub const fn executes(&self) -> bool {
        self.execute
    }

    /// Print or run `command`.
    ///
    /// # Errors
    ///
    /// Only when writing to the output sink fails. Execution failures are
    /// returned as [`RunOutcome::Failed`] / [`RunOutcome::SpawnFailed`].
    pub fn run_or_print(&mut self, command: &str) -> Result<RunOutcome> {
        if !self.execute {
            writeln!(self.out, "{command}")?;
            self.out.flush()?;
            return Ok(RunOutcome::Printed);
        }
        Ok(self.execute_once(command))
    }

    fn execute_once(&self, command: &str) -> RunOutcome {
        info!(%command, "running");
        let output = match Command::new(&self.shell).arg("-c").arg(command).output() {
            Ok(output) => output,
            Err(e) => {
                error!(shell = %self.shell, error = %e, "{}", constants::MSG_SPAWN_FAILED);
                return RunOutcome::SpawnFailed(e.to_string());
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stdout.trim().is_empty() {
            debug!(stdout = %stdout.trim(), "command output");
        }

        if output.status.success() {
            RunOutcome::Succeeded
        } else {
            let code = output.status.code();
            error!(
                %command,
                code = ?code,
                stderr = %stderr,
                "{}",
                constants::MSG_COMMAND_FAILED
            );
            RunOutcome::Failed { code, stderr }
        }
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_mode_writes_line() {
        let mut runner = Runner::new(Vec::new(), false, "sh");
        assert_eq!(runner.run_or_print("sacct -a").unwrap(), RunOutcome::Printed);
        assert_eq!(runner.run_or_print("sacct -L").unwrap(), RunOutcome::Printed);
        let out = String::from_utf8(runner.into_inner()).unwrap();
        assert_eq!(out, "sacct -a\nsacct -L\n");
    }

    #[test]
    fn test_print_mode_never_executes() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("touched");
        let mut runner = Runner::new(Vec::new(), false, "sh");
        runner
            .run_or_print(&format!("touch {}", marker.display()))
            .unwrap();
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_success() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("touched");
        let mut runner = Runner::new(Vec::new(), true, "sh");
        let outcome = runner
            .run_or_print(&format!("touch {}", marker.display()))
            .unwrap();
        assert_eq!(outcome, RunOutcome::Succeeded);
        assert!(marker.exists());
        assert!(runner.into_inner().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_execute_failure_is_not_an_error() {
        let mut runner = Runner::new(Vec::new(), true, "sh");
        let outcome = runner.run_or_print("echo boom >&2; exit 3").unwrap();
        assert_eq!(
            outcome,
            RunOutcome::Failed {
                code: Some(3),
                stderr: "boom".to_string()
            }
        );
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_execute_missing_shell() {
        let mut runner = Runner::new(Vec::new(), true, "/nonexistent/shell-for-tests");
        let outcome = runner.run_or_print("true").unwrap();
        assert!(matches!(outcome, RunOutcome::SpawnFailed(_)));
    }
}
