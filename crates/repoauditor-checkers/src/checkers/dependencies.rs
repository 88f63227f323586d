//! `Dependencies` — per-ecosystem dependency staleness probe.
//!
//! Dispatches on whichever manifest is present; a repository with no
//! recognized manifest is skipped entirely rather than treated as unhealthy.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use crate::checkers::common::{run, DEFAULT_CHECK_TIMEOUT};
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, Warning};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;
use std::path::Path;

pub struct DependenciesChecker;

enum Ecosystem {
    Go,
    Node,
    Python,
    Maven,
    Gradle,
}

fn detect(root: &Path) -> Option<Ecosystem> {
    if root.join("go.mod").exists() {
        Some(Ecosystem::Go)
    } else if root.join("package.json").exists() {
        Some(Ecosystem::Node)
    } else if root.join("pyproject.toml").exists() || root.join("requirements.txt").exists() {
        Some(Ecosystem::Python)
    } else if root.join("pom.xml").exists() {
        Some(Ecosystem::Maven)
    } else if root.join("build.gradle").exists() || root.join("build.gradle.kts").exists() {
        Some(Ecosystem::Gradle)
    } else {
        None
    }
}

fn is_unpinned(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return false;
    }
    !(line.contains("==") || line.contains(">=") || line.contains("<=") || line.contains("~="))
}

#[async_trait]
impl Checker for DependenciesChecker {
    fn id(&self) -> &str {
        "dependencies"
    }
    fn name(&self) -> &str {
        "Dependencies"
    }
    fn category(&self) -> &str {
        "dependencies"
    }

    async fn check(
        &self,
        ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let path = &repo_ctx.resolved_path;
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());

        let Some(ecosystem) = detect(path) else {
            return Ok(builder.build(&repo_ctx.repository.name));
        };

        match ecosystem {
            Ecosystem::Go => {
                let output = run(ctx, path, "go", &["mod", "tidy", "-diff"], DEFAULT_CHECK_TIMEOUT).await;
                if output.error.is_some() {
                    builder = builder.add_warning(Warning::new("tool_unavailable", "`go` is not available on PATH"));
                } else if !output.stdout.trim().is_empty() {
                    builder = builder.add_issue(Issue::new(
                        "go_mod_out_of_date",
                        Severity::Medium,
                        "go.mod/go.sum are out of sync with imports",
                    ));
                }
            }
            Ecosystem::Node => {
                let output = run(ctx, path, "npm", &["outdated", "--json"], DEFAULT_CHECK_TIMEOUT).await;
                if output.error.is_some() {
                    builder = builder.add_warning(Warning::new("tool_unavailable", "`npm` is not available on PATH"));
                } else if !output.stdout.trim().is_empty() && output.stdout.trim() != "{}" {
                    builder = builder.add_issue(Issue::new(
                        "outdated_dependency",
                        Severity::Medium,
                        "one or more npm dependencies are outdated",
                    ));
                }
            }
            Ecosystem::Python => {
                let requirements = path.join("requirements.txt");
                if requirements.exists() {
                    let contents = std::fs::read_to_string(&requirements).unwrap_or_default();
                    let unpinned = contents.lines().filter(|line| is_unpinned(line)).count();
                    if unpinned > 0 {
                        builder = builder.add_issue(Issue::new(
                            "unpinned_dependency",
                            Severity::Medium,
                            format!("{unpinned} requirement(s) have no version pin"),
                        ));
                    }
                }
            }
            Ecosystem::Maven => {
                let output = run(ctx, path, "mvn", &["dependency:analyze"], DEFAULT_CHECK_TIMEOUT).await;
                if output.error.is_some() {
                    builder = builder.add_warning(Warning::new("tool_unavailable", "`mvn` is not available on PATH"));
                } else if !output.success() {
                    builder = builder.add_issue(Issue::new(
                        "dependency_analysis_failed",
                        Severity::Medium,
                        "mvn dependency:analyze reported problems",
                    ));
                }
            }
            Ecosystem::Gradle => {
                let output = run(ctx, path, "./gradlew", &["dependencies"], DEFAULT_CHECK_TIMEOUT).await;
                if output.error.is_some() {
                    builder = builder.add_warning(Warning::new("tool_unavailable", "`gradlew` is not available"));
                }
            }
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}
