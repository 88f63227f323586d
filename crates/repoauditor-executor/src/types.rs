//! Output types shared by every command execution.

use crate::error::ExecutorError;
use std::time::Duration;

/// The result of running a single command to completion, to a timeout, or to
/// cancellation.
///
/// `stdout`/`stderr` are always UTF-8 (invalid bytes are replaced) and have
/// trailing whitespace stripped. `exit_code` is the real exit status when the
/// child ran to completion, `-1` on spawn failure, and the last observed exit
/// code (or `-1` if none was observed) on timeout.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
    pub error: Option<String>,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0 && self.error.is_none()
    }

    pub(crate) fn from_error(error: ExecutorError, duration: Duration) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: String::new(),
            duration,
            error: Some(error.to_string()),
        }
    }
}

/// Decode process bytes as UTF-8 (replacing invalid sequences) and trim
/// trailing whitespace, per the capture contract every executor backend
/// shares.
pub(crate) fn decode_and_trim(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}
