//! Process execution using `std::process::Command`.

use std::process::{Command, ExitStatus, Stdio};

use tracing::{instrument, trace};

use slam_core::{
    application::{ApplicationError, ports::CommandExecutor},
    domain::{ExecutionResult, Invocation},
    error::SlamResult,
};

/// Production executor: spawns the program directly, no shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    /// Create a new system executor.
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemExecutor {
    #[instrument(skip_all, fields(program = invocation.program()))]
    fn run(&self, invocation: &Invocation) -> SlamResult<ExecutionResult> {
        let mut command = Command::new(invocation.program());
        command.args(invocation.args()).stdin(Stdio::inherit());
        if let Some(dir) = invocation.current_dir() {
            command.current_dir(dir);
        }

        if invocation.is_streamed() {
            let status = command
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| spawn_error(invocation, e))?;
            trace!(?status, "streamed child exited");
            return Ok(ExecutionResult::new(Vec::new(), Vec::new(), returncode(status)));
        }

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(invocation, e))?;
        trace!(status = ?output.status, "captured child exited");
        Ok(ExecutionResult::new(
            output.stdout,
            output.stderr,
            returncode(output.status),
        ))
    }
}

/// The child's exit code, or [`ExecutionResult::SIGNALLED`] when it was
/// killed before exiting.
fn returncode(status: ExitStatus) -> i32 {
    status.code().unwrap_or(ExecutionResult::SIGNALLED)
}

fn spawn_error(invocation: &Invocation, e: std::io::Error) -> slam_core::error::SlamError {
    ApplicationError::SpawnFailed {
        program: invocation.program().to_string(),
        reason: e.to_string(),
    }
    .into()
}
