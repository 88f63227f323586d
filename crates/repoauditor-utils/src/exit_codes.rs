//! Process exit codes for the audit CLI.
//!
//! These are the only exit codes the binary produces (§6, §4.10). The
//! numeric values are part of the public contract other tooling scripts
//! against and must not change.

/// Type-safe wrapper around the small, closed set of exit codes the CLI can
/// produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Every repository is healthy.
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one warning, no critical results.
    pub const WARNINGS: ExitCode = ExitCode(1);
    /// At least one critical result.
    pub const CRITICAL: ExitCode = ExitCode(2);
    /// At least one repository failed at the orchestration level.
    pub const ORCHESTRATION_ERROR: ExitCode = ExitCode(3);
    /// Configuration or CLI argument is invalid.
    pub const INVALID_CONFIG: ExitCode = ExitCode(4);

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
