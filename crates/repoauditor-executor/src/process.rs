//! Async command execution with bounded timeouts and cooperative cancellation.

use crate::command_spec::CommandSpec;
use crate::error::ExecutorError;
use crate::types::{decode_and_trim, CommandOutput};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::process::Child;
use tokio_util::sync::CancellationToken;

/// Lower bound for a configured default timeout. A zero or negative
/// construction value is clamped up to [`DEFAULT_TIMEOUT`] rather than
/// silently producing a command that can never finish.
const MIN_DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Timeout applied when neither the executor nor the caller names one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes commands via argv-only [`CommandSpec`]s, never through a shell.
///
/// Every invocation races a deadline against an external [`CancellationToken`]:
/// whichever fires first terminates the child and the result carries a
/// `Timeout` error. The effective deadline is `min(caller_timeout,
/// self.default_timeout)`.
#[derive(Debug, Clone, Copy)]
pub struct CommandExecutor {
    default_timeout: Duration,
}

impl CommandExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Construct an executor with a non-default timeout ceiling. Values below
    /// [`MIN_DEFAULT_TIMEOUT`] are clamped up to [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn with_default_timeout(default_timeout: Duration) -> Self {
        let default_timeout = if default_timeout < MIN_DEFAULT_TIMEOUT {
            DEFAULT_TIMEOUT
        } else {
            default_timeout
        };
        Self { default_timeout }
    }

    #[must_use]
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    fn effective_timeout(&self, caller_timeout: Option<Duration>) -> Duration {
        caller_timeout.map_or(self.default_timeout, |t| t.min(self.default_timeout))
    }

    /// Run `spec` to completion, to its effective timeout, or until `cancel`
    /// fires, whichever happens first.
    pub async fn execute(
        &self,
        spec: &CommandSpec,
        cancel: &CancellationToken,
        timeout: Option<Duration>,
    ) -> CommandOutput {
        let effective = self.effective_timeout(timeout);
        let start = Instant::now();
        let program = spec.program_name();

        let mut command = spec.to_tokio_command();
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                return CommandOutput::from_error(
                    ExecutorError::from_spawn_error(&program, &e),
                    start.elapsed(),
                )
            }
        };

        let mut stdout_pipe = child.stdout.take().expect("stdout was piped at spawn");
        let mut stderr_pipe = child.stderr.take().expect("stderr was piped at spawn");
        let stdout_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stdout_pipe.read_to_end(&mut buf).await;
            buf
        });
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr_pipe.read_to_end(&mut buf).await;
            buf
        });

        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                stdout_task.abort();
                stderr_task.abort();
                let last_code = kill_and_reap(&mut child).await;
                let mut output = CommandOutput::from_error(
                    ExecutorError::Timeout {
                        timeout: effective,
                        cause: "cancelled".to_string(),
                    },
                    start.elapsed(),
                );
                output.exit_code = last_code.unwrap_or(-1);
                output
            }

            () = tokio::time::sleep(effective) => {
                stdout_task.abort();
                stderr_task.abort();
                let last_code = kill_and_reap(&mut child).await;
                let mut output = CommandOutput::from_error(
                    ExecutorError::Timeout {
                        timeout: effective,
                        cause: format!("exceeded {effective:?}"),
                    },
                    start.elapsed(),
                );
                output.exit_code = last_code.unwrap_or(-1);
                output
            }

            status = child.wait() => {
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();
                match status {
                    Ok(status) => CommandOutput {
                        exit_code: status.code().unwrap_or(-1),
                        stdout: decode_and_trim(&stdout),
                        stderr: decode_and_trim(&stderr),
                        duration: start.elapsed(),
                        error: None,
                    },
                    Err(e) => CommandOutput::from_error(
                        ExecutorError::ProcessingFailed { reason: e.to_string() },
                        start.elapsed(),
                    ),
                }
            }
        }
    }

    /// Whether `program` resolves on the search path, without executing it.
    #[must_use]
    pub fn is_command_available(program: &str) -> bool {
        which::which(program).is_ok()
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

async fn kill_and_reap(child: &mut Child) -> Option<i32> {
    let _ = child.start_kill();
    child.wait().await.ok().and_then(|status| status.code())
}
