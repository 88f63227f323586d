//! Top-level result of one audit run across every repository.

use crate::repository_result::RepositoryResult;
use crate::status::Status;
use chrono::{DateTime, Utc};
use repoauditor_utils::types::Severity;
use std::collections::HashMap;

/// `status_counts`/`severity_counts` are keyed by enum, not `String` (see
/// below), so this type is not directly `Serialize`; the JSON reporter
/// builds its own string-keyed mirror from it instead.
#[derive(Debug, Clone, Default)]
pub struct WorkflowSummary {
    pub successful_repos: usize,
    pub failed_repos: usize,
    pub average_score: f64,
    pub total_issues: usize,
    pub status_counts: HashMap<Status, usize>,
    pub severity_counts: HashMap<Severity, usize>,
}

#[derive(Debug, Clone)]
pub struct WorkflowResult {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_repositories: usize,
    pub repository_results: Vec<RepositoryResult>,
    pub summary: WorkflowSummary,
}

impl WorkflowResult {
    /// Summarize a completed batch of repository results. `successful_repos`
    /// is every repository without a fatal orchestration error, matching
    /// the aggregate step in the orchestration engine.
    #[must_use]
    pub fn summarize(
        repository_results: Vec<RepositoryResult>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut summary = WorkflowSummary::default();
        let total_repositories = repository_results.len();

        for repo in &repository_results {
            if repo.fatal_error.is_some() {
                summary.failed_repos += 1;
            } else {
                summary.successful_repos += 1;
            }
            *summary.status_counts.entry(repo.status).or_insert(0) += 1;

            for check in &repo.check_results {
                for issue in &check.issues {
                    summary.total_issues += 1;
                    *summary.severity_counts.entry(issue.severity).or_insert(0) += 1;
                }
            }
        }

        summary.average_score = if repository_results.is_empty() {
            0.0
        } else {
            let total: u32 = repository_results.iter().map(|r| r.score).sum();
            f64::from(total) / repository_results.len() as f64
        };

        Self {
            started_at,
            finished_at,
            total_repositories,
            repository_results,
            summary,
        }
    }

    /// Whether every repository's aggregate status is `healthy`.
    #[must_use]
    pub fn all_healthy(&self) -> bool {
        self.repository_results.iter().all(|r| r.status == Status::Healthy)
    }

    /// Whether any repository's aggregate status is `critical`.
    #[must_use]
    pub fn any_critical(&self) -> bool {
        self.repository_results.iter().any(|r| r.status == Status::Critical)
    }

    /// Whether any repository's aggregate status is `warning` (and none are
    /// `critical`).
    #[must_use]
    pub fn any_warning(&self) -> bool {
        self.repository_results.iter().any(|r| r.status == Status::Warning)
    }

    /// Whether any repository failed at the orchestration level.
    #[must_use]
    pub fn any_orchestration_error(&self) -> bool {
        self.repository_results.iter().any(|r| r.fatal_error.is_some())
    }
}
