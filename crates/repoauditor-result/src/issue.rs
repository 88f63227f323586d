//! Issues and warnings attached to a [`crate::CheckResult`].

use repoauditor_utils::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A location within a source file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
}

impl Location {
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            end_line: None,
            end_column: None,
        }
    }

    #[must_use]
    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }
}

/// A finding severe enough to affect the check's status and score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Issue {
    pub kind: String,
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
    pub suggestion: Option<String>,
    pub context: HashMap<String, String>,
}

impl Issue {
    #[must_use]
    pub fn new(kind: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            severity,
            message: message.into(),
            location: None,
            suggestion: None,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

/// A lighter-weight finding that never alone pushes status past `warning`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Warning {
    pub kind: String,
    pub message: String,
    pub location: Option<Location>,
    pub suggestion: Option<String>,
}

impl Warning {
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            location: None,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
