//! The aggregated outcome of running every checker/analyzer against one
//! repository.

use crate::check_result::CheckResult;
use crate::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of analyzing one repository's source tree (cyclomatic complexity,
/// deprecated-API scan metrics). Kept as an opaque JSON value here so that
/// [`repoauditor-result`] does not need to depend on the analyzer crate.
pub type AnalysisResult = serde_json::Value;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryResult {
    pub repository: String,
    pub check_results: Vec<CheckResult>,
    pub analysis: Option<AnalysisResult>,
    pub status: Status,
    pub score: u32,
    pub max_score: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub fatal_error: Option<String>,
}

impl RepositoryResult {
    /// Aggregate a completed repository's check results into a
    /// `RepositoryResult`. `check_results` must already be in registration
    /// order (the orchestrator guarantees this, not this constructor).
    #[must_use]
    pub fn aggregate(
        repository: impl Into<String>,
        check_results: Vec<CheckResult>,
        analysis: Option<AnalysisResult>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let status = check_results
            .iter()
            .fold(Status::Healthy, |worst, r| worst.worst(r.status));

        let score = if check_results.is_empty() {
            0
        } else {
            let total: u32 = check_results.iter().map(|r| r.score).sum();
            total / check_results.len() as u32
        };

        let max_score = check_results.iter().map(|r| r.max_score).max().unwrap_or(100);

        Self {
            repository: repository.into(),
            check_results,
            analysis,
            status,
            score,
            max_score,
            started_at,
            finished_at,
            fatal_error: None,
        }
    }

    /// Build a result for a repository that failed before any checker ran
    /// (it does not exist on disk, config refused to validate, …).
    #[must_use]
    pub fn fatal(
        repository: impl Into<String>,
        error: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            repository: repository.into(),
            check_results: Vec::new(),
            analysis: None,
            status: Status::Unknown,
            score: 0,
            max_score: 100,
            started_at,
            finished_at,
            fatal_error: Some(error.into()),
        }
    }
}
