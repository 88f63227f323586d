//! `CyclomaticComplexity` — wraps the analyzer registry's complexity
//! aggregate into a health check (§4.8 "Cyclomatic checker wrapper").

use crate::checker::{CheckContext, Checker, RepositoryContext};
use async_trait::async_trait;
use repoauditor_analyzers::{aggregate, detailed_violations, AnalyzerRegistry, FileAnalysis};
use repoauditor_config::config::model::OptionValue;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;

/// Default complexity threshold when no `max_complexity` option is set.
pub const DEFAULT_THRESHOLD: u32 = 10;

pub struct CyclomaticComplexityChecker;

fn configured_threshold(repo_ctx: &RepositoryContext) -> u32 {
    repo_ctx
        .effective_config
        .checkers
        .get("cyclomatic-complexity")
        .and_then(|cfg| cfg.options.get("max_complexity"))
        .and_then(|value| match value {
            OptionValue::Number(n) => Some(*n as u32),
            _ => None,
        })
        .unwrap_or(DEFAULT_THRESHOLD)
}

fn analyze_repository(registry: &AnalyzerRegistry, root: &std::path::Path) -> Vec<FileAnalysis> {
    let mut analyses = Vec::new();
    for language in repoauditor_analyzers::Language::all() {
        let Some(analyzer) = registry.get(*language) else {
            continue;
        };
        let Ok(files) = repoauditor_walker::find_files(root, &analyzer.file_pattern()) else {
            continue;
        };
        for file in files {
            if repoauditor_utils::paths::validate_source_path(&file).is_err() {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&file) else {
                continue;
            };
            analyses.push(analyzer.analyze(&file, &content));
        }
    }
    analyses
}

#[async_trait]
impl Checker for CyclomaticComplexityChecker {
    fn id(&self) -> &str {
        "cyclomatic-complexity"
    }
    fn name(&self) -> &str {
        "Cyclomatic Complexity"
    }
    fn category(&self) -> &str {
        "quality"
    }

    async fn check(
        &self,
        _ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let path = &repo_ctx.resolved_path;
        let threshold = configured_threshold(repo_ctx);
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());

        let registry = AnalyzerRegistry::with_builtins();
        let analyses = analyze_repository(&registry, path);

        if analyses.is_empty() {
            return Ok(builder.build(&repo_ctx.repository.name));
        }

        let report = aggregate(&analyses);
        builder = builder
            .add_metric("total_files", report.total_files)
            .add_metric("total_functions", report.total_functions)
            .add_metric("average_complexity", report.average_complexity)
            .add_metric("max_complexity", i64::from(report.max_complexity))
            .add_metric("high_complexity_files", report.high_complexity_files)
            .add_metric("very_high_complexity_files", report.very_high_complexity_files);

        let half_threshold = f64::from(threshold) / 2.0;
        if report.average_complexity > f64::from(threshold) {
            let violations = detailed_violations(&analyses, threshold);
            builder = builder.add_issue(
                Issue::new(
                    "high_complexity",
                    Severity::High,
                    format!(
                        "average cyclomatic complexity {:.2} exceeds the threshold of {threshold} ({} violation(s))",
                        report.average_complexity,
                        violations.len()
                    ),
                )
                .with_context("average_complexity", report.average_complexity.to_string())
                .with_context("threshold", threshold.to_string()),
            );
        } else if report.average_complexity > half_threshold {
            builder = builder.add_issue(
                Issue::new(
                    "elevated_complexity",
                    Severity::Medium,
                    format!(
                        "average cyclomatic complexity {:.2} is above half the threshold of {threshold}",
                        report.average_complexity
                    ),
                )
                .with_suggestion("consider decomposing the most complex functions reported above"),
            );
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}
