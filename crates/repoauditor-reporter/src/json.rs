//! `--format json` output (§6 ambient addition).
//!
//! [`repoauditor_result::WorkflowSummary`] keys its count maps by enum
//! (`Status`, `Severity`), which `serde_json` cannot turn into object keys
//! via a plain derive. This module mirrors it into a string-keyed DTO and
//! serializes that instead; [`repoauditor_result::CheckResult`] and
//! [`repoauditor_result::RepositoryResult`] already derive `Serialize` and
//! are embedded as-is.

use chrono::{DateTime, Utc};
use repoauditor_result::{RepositoryResult, WorkflowResult};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
struct SummaryDto {
    successful_repos: usize,
    failed_repos: usize,
    average_score: f64,
    total_issues: usize,
    status_counts: HashMap<String, usize>,
    severity_counts: HashMap<String, usize>,
}

#[derive(Debug, Serialize)]
struct WorkflowResultDto<'a> {
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    total_repositories: usize,
    repository_results: &'a [RepositoryResult],
    summary: SummaryDto,
}

/// Serialize `result` as pretty-printed JSON.
///
/// # Errors
/// Returns an error only if `serde_json` itself fails, which does not
/// happen for this DTO (no non-finite floats, no non-UTF-8 map keys).
pub fn to_json(result: &WorkflowResult) -> serde_json::Result<String> {
    let dto = WorkflowResultDto {
        started_at: result.started_at,
        finished_at: result.finished_at,
        total_repositories: result.total_repositories,
        repository_results: &result.repository_results,
        summary: SummaryDto {
            successful_repos: result.summary.successful_repos,
            failed_repos: result.summary.failed_repos,
            average_score: result.summary.average_score,
            total_issues: result.summary.total_issues,
            status_counts: result.summary.status_counts.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
            severity_counts: result.summary.severity_counts.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
        },
    };
    serde_json::to_string_pretty(&dto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use repoauditor_result::{CheckResultBuilder, Issue};
    use repoauditor_utils::types::Severity;

    #[test]
    fn serializes_status_and_severity_keys_as_strings() {
        let now = Utc::now();
        let repo = RepositoryResult::aggregate(
            "demo",
            vec![CheckResultBuilder::new("license", "License", "compliance")
                .add_issue(Issue::new("missing_license", Severity::Medium, "no LICENSE file found"))
                .build("demo")],
            None,
            now,
            now,
        );
        let result = WorkflowResult::summarize(vec![repo], now, now);

        let json = to_json(&result).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parses back");
        assert_eq!(value["summary"]["status_counts"]["warning"], 1);
        assert_eq!(value["summary"]["severity_counts"]["medium"], 1);
        assert_eq!(value["repository_results"][0]["repository"], "demo");
    }
}
