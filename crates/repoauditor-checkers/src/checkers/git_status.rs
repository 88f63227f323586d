//! `GitStatus` — requires a git repository, flags uncommitted changes.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use crate::checkers::common::{is_git_repository, run, DEFAULT_CHECK_TIMEOUT};
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, Warning};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;

pub struct GitStatusChecker;

#[async_trait]
impl Checker for GitStatusChecker {
    fn id(&self) -> &str {
        "git-status"
    }
    fn name(&self) -> &str {
        "Git Status"
    }
    fn category(&self) -> &str {
        "git"
    }

    async fn check(
        &self,
        ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let path = &repo_ctx.resolved_path;
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());

        if !is_git_repository(path) {
            builder = builder.add_issue(Issue::new(
                "not_git_repo",
                Severity::Critical,
                format!("{} is not a git repository", path.display()),
            ));
            return Ok(builder.build(&repo_ctx.repository.name));
        }

        let output = run(ctx, path, "git", &["status", "--porcelain"], DEFAULT_CHECK_TIMEOUT).await;

        if let Some(error) = &output.error {
            builder = builder.add_issue(Issue::new(
                "git_status_failed",
                Severity::Critical,
                format!("git status failed: {error}"),
            ));
        } else if !output.stdout.trim().is_empty() {
            let entries = output.stdout.lines().count();
            builder = builder.add_warning(Warning::new(
                "uncommitted_changes",
                format!("{entries} uncommitted change(s)"),
            ));
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}
