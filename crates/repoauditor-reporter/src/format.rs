//! Compact/verbose text formatter (§4.10, §7 "User-visible behaviour").
//!
//! Compact mode prints only non-healthy checks; verbose prints every check,
//! each with its duration. Both modes lead with one summary block.

use repoauditor_result::{CheckResult, RepositoryResult, Status, WorkflowResult};
use std::fmt::Write as _;

/// Render `result` as the lines the CLI writes to stdout.
#[must_use]
pub fn format_workflow(result: &WorkflowResult, verbose: bool) -> String {
    let mut out = String::new();
    write_summary(&mut out, result);
    for repo in &result.repository_results {
        write_repository(&mut out, repo, verbose);
    }
    out
}

fn write_summary(out: &mut String, result: &WorkflowResult) {
    let summary = &result.summary;
    let _ = writeln!(
        out,
        "repoauditor: {} repositories, avg score {:.1}, {} issue(s)",
        result.total_repositories, summary.average_score, summary.total_issues
    );

    let mut status_parts: Vec<(Status, usize)> = summary.status_counts.iter().map(|(s, c)| (*s, *c)).collect();
    status_parts.sort_by_key(|(status, _)| *status);
    let status_line: Vec<String> = status_parts.iter().map(|(status, count)| format!("{status}={count}")).collect();
    let _ = writeln!(out, "  status: {}", status_line.join(" "));

    let mut severity_parts: Vec<_> = summary.severity_counts.iter().collect();
    severity_parts.sort_by_key(|(severity, _)| **severity);
    if !severity_parts.is_empty() {
        let severity_line: Vec<String> = severity_parts.iter().map(|(sev, count)| format!("{sev}={count}")).collect();
        let _ = writeln!(out, "  severity: {}", severity_line.join(" "));
    }
    out.push('\n');
}

fn write_repository(out: &mut String, repo: &RepositoryResult, verbose: bool) {
    let _ = writeln!(out, "{} [{}] score={}/{}", repo.repository, repo.status, repo.score, repo.max_score);

    if let Some(error) = &repo.fatal_error {
        let _ = writeln!(out, "  orchestration error: {error}");
        out.push('\n');
        return;
    }

    let mut printed_any = false;
    for check in &repo.check_results {
        if !verbose && check.status == Status::Healthy {
            continue;
        }
        printed_any = true;
        write_check(out, check, verbose);
    }
    if !printed_any {
        let _ = writeln!(out, "  (all checks healthy)");
    }
    out.push('\n');
}

fn write_check(out: &mut String, check: &CheckResult, verbose: bool) {
    if verbose {
        let _ = writeln!(
            out,
            "  [{}] {} ({}) - {:.3}s",
            check.status,
            check.name,
            check.category,
            check.duration.as_secs_f64()
        );
    } else {
        let _ = writeln!(out, "  [{}] {} ({})", check.status, check.name, check.category);
    }

    for issue in &check.issues {
        let _ = write!(out, "    - {} [{}]: {}", issue.kind, issue.severity, issue.message);
        if let Some(location) = &issue.location {
            let _ = write!(out, " ({}:{})", location.file, location.line);
        }
        out.push('\n');
        if verbose {
            if let Some(suggestion) = &issue.suggestion {
                let _ = writeln!(out, "      suggestion: {suggestion}");
            }
        }
    }

    for warning in &check.warnings {
        let _ = writeln!(out, "    - {}: {}", warning.kind, warning.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use repoauditor_result::{CheckResultBuilder, Issue};
    use repoauditor_utils::types::Severity;

    fn sample_result() -> WorkflowResult {
        let now = Utc::now();
        let healthy = CheckResultBuilder::new("git-status", "Git Status", "git").build("demo");
        let warning = CheckResultBuilder::new("license", "License", "compliance")
            .add_issue(Issue::new("missing_license", Severity::Medium, "no LICENSE file found"))
            .build("demo");
        let repo = RepositoryResult::aggregate("demo", vec![healthy, warning], None, now, now);
        WorkflowResult::summarize(vec![repo], now, now)
    }

    #[test]
    fn compact_mode_omits_healthy_checks() {
        let output = format_workflow(&sample_result(), false);
        assert!(!output.contains("Git Status"));
        assert!(output.contains("License"));
        assert!(output.contains("no LICENSE file found"));
    }

    #[test]
    fn verbose_mode_includes_every_check_and_duration() {
        let output = format_workflow(&sample_result(), true);
        assert!(output.contains("Git Status"));
        assert!(output.contains("License"));
        assert!(output.contains('s'));
    }

    #[test]
    fn fatal_repository_prints_orchestration_error_not_checks() {
        let now = Utc::now();
        let fatal = RepositoryResult::fatal("broken", "repository path does not exist", now, now);
        let result = WorkflowResult::summarize(vec![fatal], now, now);
        let output = format_workflow(&result, false);
        assert!(output.contains("orchestration error"));
        assert!(output.contains("repository path does not exist"));
    }

    #[test]
    fn summary_block_reports_counts() {
        let output = format_workflow(&sample_result(), false);
        assert!(output.contains("1 repositories"));
        assert!(output.contains("1 issue(s)"));
    }
}
