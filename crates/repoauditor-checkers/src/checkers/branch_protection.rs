//! `BranchProtection` — a points-based estimate of how protected the default
//! branch is, built from signals available without API credentials plus an
//! optional `gh` probe.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use crate::checkers::common::{run, DEFAULT_CHECK_TIMEOUT};
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, Warning};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;

const GITHUB_API_POINTS: u32 = 50;
const LOCAL_POLICY_POINTS: u32 = 20;
const GOVERNANCE_FILE_POINTS: u32 = 20;
const MERGE_HISTORY_POINTS: u32 = 10;

const HEALTHY_THRESHOLD: u32 = 70;
const WARNING_THRESHOLD: u32 = 40;

const GOVERNANCE_FILES: &[&str] = &[
    "CODEOWNERS",
    ".github/CODEOWNERS",
    ".github/pull_request_template.md",
    ".github/PULL_REQUEST_TEMPLATE.md",
    ".github/workflows",
];

pub struct BranchProtectionChecker;

impl BranchProtectionChecker {
    async fn default_branch(&self, ctx: &CheckContext, path: &std::path::Path) -> Option<String> {
        let output = run(
            ctx,
            path,
            "git",
            &["symbolic-ref", "refs/remotes/origin/HEAD"],
            DEFAULT_CHECK_TIMEOUT,
        )
        .await;
        if output.success() {
            return output.stdout.trim().rsplit('/').next().map(str::to_string);
        }
        for candidate in ["main", "master", "develop"] {
            let branch_exists = run(
                ctx,
                path,
                "git",
                &["rev-parse", "--verify", "--quiet", &format!("refs/heads/{candidate}")],
                DEFAULT_CHECK_TIMEOUT,
            )
            .await;
            if branch_exists.success() {
                return Some(candidate.to_string());
            }
        }
        None
    }
}

#[async_trait]
impl Checker for BranchProtectionChecker {
    fn id(&self) -> &str {
        "branch-protection"
    }
    fn name(&self) -> &str {
        "Branch Protection"
    }
    fn category(&self) -> &str {
        "security"
    }

    async fn check(
        &self,
        ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let path = &repo_ctx.resolved_path;
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());

        let Some(default_branch) = self.default_branch(ctx, path).await else {
            builder = builder.add_warning(Warning::new(
                "no_default_branch",
                "could not determine the repository's default branch",
            ));
            return Ok(builder.build(&repo_ctx.repository.name));
        };

        let mut points = 0u32;

        let gh_output = run(
            ctx,
            path,
            "gh",
            &["api", &format!("repos/{{owner}}/{{repo}}/branches/{default_branch}/protection")],
            DEFAULT_CHECK_TIMEOUT,
        )
        .await;
        if gh_output.success() {
            points += GITHUB_API_POINTS;
        }

        if path.join(".github/branch-protection.yml").exists() || path.join(".github/settings.yml").exists() {
            points += LOCAL_POLICY_POINTS;
        }

        if GOVERNANCE_FILES.iter().any(|relative| path.join(relative).exists()) {
            points += GOVERNANCE_FILE_POINTS;
        }

        let merges = run(ctx, path, "git", &["log", "--merges", "-5", "--oneline"], DEFAULT_CHECK_TIMEOUT).await;
        if !merges.stdout.trim().is_empty() {
            points += MERGE_HISTORY_POINTS;
        }

        builder = builder.add_metric("branch_protection_score", i64::from(points));

        if points < WARNING_THRESHOLD {
            builder = builder.add_issue(Issue::new(
                "unprotected_branch",
                Severity::High,
                format!("default branch `{default_branch}` shows no evidence of protection ({points} pts)"),
            ));
        } else if points < HEALTHY_THRESHOLD {
            builder = builder.add_warning(Warning::new(
                "weak_branch_protection",
                format!("default branch `{default_branch}` has partial protection signals ({points} pts)"),
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

    fn init_repo(dir: &std::path::Path) {
        Command::new("git").arg("init").current_dir(dir).output().unwrap();
        Command::new("git").args(["config", "user.email", "a@b.c"]).current_dir(dir).output().unwrap();
        Command::new("git").args(["config", "user.name", "a"]).current_dir(dir).output().unwrap();
        std::fs::write(dir.join("a.txt"), "hello").unwrap();
        Command::new("git").args(["add", "."]).current_dir(dir).output().unwrap();
        Command::new("git").args(["commit", "-m", "init"]).current_dir(dir).output().unwrap();
    }

    #[tokio::test]
    async fn no_protection_signals_is_critical() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let result = BranchProtectionChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Critical);
    }

    #[tokio::test]
    async fn governance_files_and_merges_reach_warning() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        std::fs::create_dir_all(dir.path().join(".github")).unwrap();
        std::fs::write(dir.path().join("CODEOWNERS"), "* @someone").unwrap();
        Command::new("git")
            .args(["commit", "--allow-empty", "-m", "merge pr #1"])
            .current_dir(dir.path())
            .output()
            .unwrap();
        Command::new("git")
            .args(["commit", "--allow-empty", "-m", "Merge pull request #2"])
            .current_dir(dir.path())
            .output()
            .unwrap();

        let result = BranchProtectionChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_ne!(result.status, Status::Critical);
    }

    #[tokio::test]
    async fn no_default_branch_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let result = BranchProtectionChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.warnings[0].kind, "no_default_branch");
    }
}
