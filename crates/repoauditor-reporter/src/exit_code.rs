//! Mapping a [`WorkflowResult`] onto the CLI's exit-code policy (§4.10).

use repoauditor_result::WorkflowResult;
use repoauditor_utils::exit_codes::ExitCode;

/// The worst outcome wins: an orchestration failure outranks a critical
/// check, which outranks a bare warning. `0` only when none of those fired.
#[must_use]
pub fn exit_code_for(result: &WorkflowResult) -> ExitCode {
    if result.any_orchestration_error() {
        ExitCode::ORCHESTRATION_ERROR
    } else if result.any_critical() {
        ExitCode::CRITICAL
    } else if result.any_warning() {
        ExitCode::WARNINGS
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use repoauditor_result::{CheckResultBuilder, Issue, RepositoryResult};
    use repoauditor_utils::types::Severity;

    #[test]
    fn every_repo_healthy_exits_zero() {
        let now = Utc::now();
        let repo = RepositoryResult::aggregate("a", vec![CheckResultBuilder::new("x", "X", "quality").build("a")], None, now, now);
        let result = WorkflowResult::summarize(vec![repo], now, now);
        assert_eq!(exit_code_for(&result).as_i32(), 0);
    }

    #[test]
    fn warning_without_critical_exits_one() {
        let now = Utc::now();
        let repo = RepositoryResult::aggregate(
            "a",
            vec![CheckResultBuilder::new("x", "X", "quality")
                .add_issue(Issue::new("k", Severity::Medium, "m"))
                .build("a")],
            None,
            now,
            now,
        );
        let result = WorkflowResult::summarize(vec![repo], now, now);
        assert_eq!(exit_code_for(&result).as_i32(), 1);
    }

    #[test]
    fn critical_outranks_warning() {
        let now = Utc::now();
        let warn = RepositoryResult::aggregate(
            "a",
            vec![CheckResultBuilder::new("x", "X", "quality")
                .add_issue(Issue::new("k", Severity::Medium, "m"))
                .build("a")],
            None,
            now,
            now,
        );
        let critical = RepositoryResult::aggregate(
            "b",
            vec![CheckResultBuilder::new("y", "Y", "quality")
                .add_issue(Issue::new("k", Severity::Critical, "m"))
                .build("b")],
            None,
            now,
            now,
        );
        let result = WorkflowResult::summarize(vec![warn, critical], now, now);
        assert_eq!(exit_code_for(&result).as_i32(), 2);
    }

    #[test]
    fn orchestration_error_outranks_everything() {
        let now = Utc::now();
        let critical = RepositoryResult::aggregate(
            "a",
            vec![CheckResultBuilder::new("y", "Y", "quality")
                .add_issue(Issue::new("k", Severity::Critical, "m"))
                .build("a")],
            None,
            now,
            now,
        );
        let fatal = RepositoryResult::fatal("b", "repository path does not exist", now, now);
        let result = WorkflowResult::summarize(vec![critical, fatal], now, now);
        assert_eq!(exit_code_for(&result).as_i32(), 3);
    }
}
