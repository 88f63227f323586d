//! `LastCommit` — flags repositories that haven't been touched in a while.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use crate::checkers::common::{is_git_repository, run, DEFAULT_CHECK_TIMEOUT};
use async_trait::async_trait;
use chrono::Utc;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, Warning};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;

const WARNING_AGE_DAYS: i64 = 90;
const CRITICAL_AGE_DAYS: i64 = 365;

pub struct LastCommitChecker;

#[async_trait]
impl Checker for LastCommitChecker {
    fn id(&self) -> &str {
        "last-commit"
    }
    fn name(&self) -> &str {
        "Last Commit Age"
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

        let output = run(
            ctx,
            path,
            "git",
            &["log", "-1", "--format=%ct"],
            DEFAULT_CHECK_TIMEOUT,
        )
        .await;

        let Some(timestamp) = output.stdout.trim().parse::<i64>().ok() else {
            builder = builder.add_warning(Warning::new(
                "no_commit_history",
                "unable to determine the timestamp of the last commit",
            ));
            return Ok(builder.build(&repo_ctx.repository.name));
        };

        let age_days = (Utc::now().timestamp() - timestamp) / 86_400;
        builder = builder.add_metric("last_commit_age_days", age_days);

        if age_days > CRITICAL_AGE_DAYS {
            builder = builder.add_issue(Issue::new(
                "stale_repository",
                Severity::High,
                format!("last commit was {age_days} days ago"),
            ));
        } else if age_days > WARNING_AGE_DAYS {
            builder = builder.add_warning(Warning::new(
                "aging_repository",
                format!("last commit was {age_days} days ago"),
            ));
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoauditor_config::config::model::{Config, Repository};
    use repoauditor_executor::CommandExecutor;
    use repoauditor_result::Status;
    use repoauditor_utils::logging::Logger;
    use std::process::Command;
    use tempfile::TempDir;
    use tokio_util::sync::CancellationToken;

    fn repo_ctx(path: &std::path::Path) -> RepositoryContext {
        RepositoryContext::new(
            Repository {
                name: "demo".to_string(),
                path: path.display().to_string(),
                url: None,
                branch: None,
                language: None,
                tags: Default::default(),
                metadata: Default::default(),
            },
            path.to_path_buf(),
            Config::default(),
        )
    }

    fn ctx() -> CheckContext {
        CheckContext::new(CommandExecutor::new(), CancellationToken::new(), Logger::new())
    }

    #[tokio::test]
    async fn recent_commit_is_healthy() {
        let dir = TempDir::new().unwrap();
        Command::new("git").arg("init").current_dir(dir.path()).output().unwrap();
        Command::new("git")
            .args(["config", "user.email", "a@b.c"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        Command::new("git")
            .args(["config", "user.name", "a"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
        Command::new("git").args(["add", "."]).current_dir(dir.path()).output().unwrap();
        Command::new("git")
            .args(["commit", "-m", "init"])
            .current_dir(dir.path())
            .output()
            .unwrap();

        let result = LastCommitChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Healthy);
    }

    #[tokio::test]
    async fn missing_git_repo_is_critical() {
        let dir = TempDir::new().unwrap();
        let result = LastCommitChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Critical);
    }

    #[tokio::test]
    async fn no_commits_yet_is_a_warning() {
        let dir = TempDir::new().unwrap();
        Command::new("git").arg("init").current_dir(dir.path()).output().unwrap();

        let result = LastCommitChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.warnings[0].kind, "no_commit_history");
    }
}
