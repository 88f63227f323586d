//! Error model shared by every checker, analyzer, and the orchestration engine.
//!
//! `CheckError` is the one error type that crosses component boundaries. It
//! carries enough context (which checker, which operation, which repository
//! or file) that the reporter and the logs never need to re-derive it, and a
//! [`retriable`](CheckError::is_retriable) flag so callers can decide whether
//! a failure is worth surfacing differently without matching on the code.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Stable error codes used across checkers, analyzers, and the walker.
///
/// The variant set is deliberately small and closed: new failure modes should
/// be mapped onto one of these rather than growing the enum, since the
/// reporter and `is_retriable` depend on it being exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ToolNotFound,
    FileNotFound,
    Timeout,
    PermissionDenied,
    InvalidInput,
    NetworkError,
    ParsingFailed,
    ProcessingFailed,
}

impl ErrorCode {
    /// Whether a failure tagged with this code is worth retrying.
    ///
    /// The core never retries automatically (checkers run at most once per
    /// repository per audit); this flag is surfaced for UI display and for
    /// any future retry policy layered on top.
    #[must_use]
    pub const fn is_retriable(self) -> bool {
        matches!(self, Self::Timeout | Self::NetworkError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ToolNotFound => "tool_not_found",
            Self::FileNotFound => "file_not_found",
            Self::Timeout => "timeout",
            Self::PermissionDenied => "permission_denied",
            Self::InvalidInput => "invalid_input",
            Self::NetworkError => "network_error",
            Self::ParsingFailed => "parsing_failed",
            Self::ProcessingFailed => "processing_failed",
        };
        write!(f, "{s}")
    }
}

/// Categorized error raised by a checker, analyzer, or the executor/walker
/// they are built on.
///
/// Carries `checker` (the component that raised it), `operation` (what it was
/// doing), the [`ErrorCode`], an optional wrapped cause, and a free-form
/// `context` map (file, repository, …) for display.
#[derive(Error, Debug)]
#[error("{checker}: {operation} failed ({code}){}", format_cause(.cause))]
pub struct CheckError {
    pub checker: String,
    pub operation: String,
    pub code: ErrorCode,
    #[source]
    pub cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    pub context: HashMap<String, String>,
}

fn format_cause(cause: &Option<Box<dyn std::error::Error + Send + Sync + 'static>>) -> String {
    match cause {
        Some(e) => format!(": {e}"),
        None => String::new(),
    }
}

impl CheckError {
    #[must_use]
    pub fn new(checker: impl Into<String>, operation: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            checker: checker.into(),
            operation: operation.into(),
            code,
            cause: None,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_cause(
        mut self,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Whether this error is worth retrying (see [`ErrorCode::is_retriable`]).
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        self.code.is_retriable()
    }

    /// Classify a cause's message into an [`ErrorCode`] when the caller did
    /// not pre-classify it.
    ///
    /// Uses substring tests on common phrasings produced by OS errors and
    /// external tools (`git`, `go`, `mvn`, …); anything unrecognized maps to
    /// [`ErrorCode::ProcessingFailed`].
    #[must_use]
    pub fn categorize(message: &str) -> ErrorCode {
        let lower = message.to_lowercase();
        if lower.contains("not found") || lower.contains("no such file") {
            ErrorCode::FileNotFound
        } else if lower.contains("permission denied") || lower.contains("access is denied") {
            ErrorCode::PermissionDenied
        } else if lower.contains("timed out") || lower.contains("timeout") {
            ErrorCode::Timeout
        } else if lower.contains("parse") || lower.contains("syntax") {
            ErrorCode::ParsingFailed
        } else if lower.contains("connection") || lower.contains("network") || lower.contains("dns")
        {
            ErrorCode::NetworkError
        } else {
            ErrorCode::ProcessingFailed
        }
    }
}

/// Configuration-related errors raised while loading or validating a
/// [`crate::types::ConfigSource`]-tagged configuration tree.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration file at {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("configuration file not found at {path}")]
    NotFound { path: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("missing required configuration: {0}")]
    MissingRequired(String),

    #[error("configuration validation failed: {} error(s)", errors.len())]
    ValidationFailed { errors: Vec<String> },
}

/// Top-level error type returned by library operations outside a single
/// checker invocation (config loading, engine setup, reporting).
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("check execution error: {0}")]
    Check(#[from] CheckError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retriable_codes_are_exactly_timeout_and_network() {
        assert!(ErrorCode::Timeout.is_retriable());
        assert!(ErrorCode::NetworkError.is_retriable());
        assert!(!ErrorCode::ToolNotFound.is_retriable());
        assert!(!ErrorCode::ParsingFailed.is_retriable());
        assert!(!ErrorCode::ProcessingFailed.is_retriable());
        assert!(!ErrorCode::PermissionDenied.is_retriable());
        assert!(!ErrorCode::InvalidInput.is_retriable());
        assert!(!ErrorCode::FileNotFound.is_retriable());
    }

    #[test]
    fn categorize_maps_common_phrasings() {
        assert_eq!(CheckError::categorize("command not found"), ErrorCode::FileNotFound);
        assert_eq!(
            CheckError::categorize("Permission denied (publickey)"),
            ErrorCode::PermissionDenied
        );
        assert_eq!(CheckError::categorize("command timed out after 30s"), ErrorCode::Timeout);
        assert_eq!(CheckError::categorize("syntax error near line 4"), ErrorCode::ParsingFailed);
        assert_eq!(CheckError::categorize("could not resolve host"), ErrorCode::ProcessingFailed);
        assert_eq!(CheckError::categorize("connection refused"), ErrorCode::NetworkError);
        assert_eq!(CheckError::categorize("something odd"), ErrorCode::ProcessingFailed);
    }

    #[test]
    fn builder_accumulates_context() {
        let err = CheckError::new("git-status", "run git status", ErrorCode::ProcessingFailed)
            .with_context("repository", "demo")
            .with_context("file", "a.rs");
        assert_eq!(err.context.get("repository").map(String::as_str), Some("demo"));
        assert_eq!(err.context.get("file").map(String::as_str), Some("a.rs"));
        assert!(!err.is_retriable());
    }
}
