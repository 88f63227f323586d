//! Error types for command execution.

use thiserror::Error;

/// Failure modes for a single command execution.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("executable not found on PATH: {program}")]
    ToolNotFound { program: String },

    #[error("permission denied executing {program}")]
    PermissionDenied { program: String },

    #[error("command timed out after {timeout:?}: {cause}")]
    Timeout {
        timeout: std::time::Duration,
        cause: String,
    },

    #[error("command execution failed: {reason}")]
    ProcessingFailed { reason: String },
}

impl ExecutorError {
    /// Classify a spawn-time [`std::io::Error`] into the executor's own error
    /// taxonomy, so callers never have to match on `io::ErrorKind` themselves.
    #[must_use]
    pub fn from_spawn_error(program: &str, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::ToolNotFound {
                program: program.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                program: program.to_string(),
            },
            _ => Self::ProcessingFailed {
                reason: error.to_string(),
            },
        }
    }
}
