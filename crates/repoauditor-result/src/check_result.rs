//! A single checker's result, and the fluent builder that produces it.

use crate::issue::{Issue, Warning};
use crate::metric::MetricValue;
use crate::status::Status;
use chrono::{DateTime, Utc};
use repoauditor_utils::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The outcome of running one checker against one repository.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckResult {
    pub id: String,
    pub name: String,
    pub category: String,
    pub status: Status,
    pub score: u32,
    pub max_score: u32,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Warning>,
    pub metrics: HashMap<String, MetricValue>,
    pub metadata: HashMap<String, String>,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
    pub repository: String,
}

/// An issue severity of `High` or above also forces [`Status::Critical`],
/// matching the invariant in the data model (`status = critical` iff any
/// issue has severity ≥ `high`).
fn forces_critical(severity: Severity) -> bool {
    severity >= Severity::High
}

/// Only `Medium`-severity issues (or any warning) raise status to `warning`
/// on their own; `Info`/`Low` issues are recorded without moving status off
/// `healthy`. This mirrors testable property 1 rather than the looser prose
/// in the component design section, which would make `Info` issues flip
/// status too.
fn forces_warning(severity: Severity) -> bool {
    severity == Severity::Medium
}

/// Score deduction for one issue. `Critical`/`High` issues (both of which
/// independently force a `critical` status) are charged the full 20 points;
/// `Medium` (the only severity that independently forces `warning`) is
/// charged 10; `Info`/`Low` are charged the "info issue" rate of 5.
fn issue_penalty(severity: Severity) -> u32 {
    match severity {
        Severity::Critical | Severity::High => 20,
        Severity::Medium => 10,
        Severity::Low | Severity::Info => 5,
    }
}

/// Fluent, consuming builder for a [`CheckResult`].
///
/// Every `add_*`/`with_*` method takes `self` by value and returns `self`,
/// so a checker can build its result as a single chained expression. Status
/// and score are recomputed from the accumulated issues/warnings exactly
/// once, in [`CheckResultBuilder::build`].
#[derive(Debug, Clone)]
pub struct CheckResultBuilder {
    id: String,
    name: String,
    category: String,
    max_score: u32,
    issues: Vec<Issue>,
    warnings: Vec<Warning>,
    metrics: HashMap<String, MetricValue>,
    metadata: HashMap<String, String>,
    status_override: Option<Status>,
    started_at: Instant,
}

impl CheckResultBuilder {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            max_score: 100,
            issues: Vec::new(),
            warnings: Vec::new(),
            metrics: HashMap::new(),
            metadata: HashMap::new(),
            status_override: None,
            started_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn add_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    #[must_use]
    pub fn add_warning(mut self, warning: Warning) -> Self {
        self.warnings.push(warning);
        self
    }

    #[must_use]
    pub fn add_metric(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn add_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = max_score;
        self
    }

    /// Override the computed status outright. `severity` is recorded as
    /// metadata only (for display); it does not feed back into scoring.
    #[must_use]
    pub fn with_status(mut self, status: Status, severity: Severity) -> Self {
        self.status_override = Some(status);
        self.metadata.insert("status_override_severity".to_string(), severity.to_string());
        self
    }

    fn computed_status(&self) -> Status {
        if let Some(status) = self.status_override {
            return status;
        }
        if self.issues.iter().any(|i| forces_critical(i.severity)) {
            return Status::Critical;
        }
        if !self.warnings.is_empty() || self.issues.iter().any(|i| forces_warning(i.severity)) {
            return Status::Warning;
        }
        Status::Healthy
    }

    fn computed_score(&self) -> u32 {
        let mut score: i64 = 100;
        for issue in &self.issues {
            score -= i64::from(issue_penalty(issue.severity));
        }
        score -= 3 * self.warnings.len() as i64;
        score.clamp(0, i64::from(self.max_score)) as u32
    }

    /// Finalize the result for `repository`, recomputing status and score
    /// from the accumulated issues/warnings in one pass.
    #[must_use]
    pub fn build(self, repository: impl Into<String>) -> CheckResult {
        let status = self.computed_status();
        let score = self.computed_score();
        CheckResult {
            id: self.id,
            name: self.name,
            category: self.category,
            status,
            score,
            max_score: self.max_score,
            issues: self.issues,
            warnings: self.warnings,
            metrics: self.metrics,
            metadata: self.metadata,
            duration: self.started_at.elapsed(),
            timestamp: Utc::now(),
            repository: repository.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_findings_is_healthy_with_full_score() {
        let result = CheckResultBuilder::new("git-status", "Git Status", "git").build("demo");
        assert_eq!(result.status, Status::Healthy);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn medium_issue_forces_warning_not_critical() {
        let result = CheckResultBuilder::new("deps", "Dependencies", "dependencies")
            .add_issue(Issue::new("outdated_dependency", Severity::Medium, "3 packages outdated"))
            .build("demo");
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.score, 90);
    }

    #[test]
    fn high_severity_issue_forces_critical() {
        let result = CheckResultBuilder::new("git-status", "Git Status", "git")
            .add_issue(Issue::new("not_git_repo", Severity::Critical, "not a git repository"))
            .build("demo");
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.score, 80);
    }

    #[test]
    fn info_issue_alone_does_not_change_status() {
        let result = CheckResultBuilder::new("docs", "Documentation", "documentation")
            .add_issue(Issue::new("missing_section", Severity::Info, "no examples section"))
            .build("demo");
        assert_eq!(result.status, Status::Healthy);
        assert_eq!(result.score, 95);
    }

    #[test]
    fn bare_warning_forces_warning_status() {
        let result = CheckResultBuilder::new("ci", "CI Status", "ci")
            .add_warning(Warning::new("no_ci_config", "no CI configuration found"))
            .build("demo");
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.score, 97);
    }

    #[test]
    fn score_never_drops_below_zero() {
        let mut builder = CheckResultBuilder::new("deprecated", "Deprecated Components", "quality");
        for _ in 0..10 {
            builder = builder.add_issue(Issue::new("deprecated_api", Severity::Critical, "uses deprecated API"));
        }
        let result = builder.build("demo");
        assert_eq!(result.score, 0);
        assert_eq!(result.status, Status::Critical);
    }

    #[test]
    fn explicit_status_override_wins() {
        let result = CheckResultBuilder::new("x", "X", "quality")
            .with_status(Status::Unknown, Severity::Info)
            .build("demo");
        assert_eq!(result.status, Status::Unknown);
    }
}
