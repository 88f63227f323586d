//! `CIStatus` — flags repositories with no recognized CI configuration.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Warning};
use repoauditor_utils::error::CheckError;

const CI_PATHS: &[&str] = &[
    ".github/workflows",
    ".gitlab-ci.yml",
    "Jenkinsfile",
    ".travis.yml",
    "azure-pipelines.yml",
    ".circleci/config.yml",
    "buildkite.yml",
];

pub struct CiStatusChecker;

#[async_trait]
impl Checker for CiStatusChecker {
    fn id(&self) -> &str {
        "ci-status"
    }
    fn name(&self) -> &str {
        "CI Status"
    }
    fn category(&self) -> &str {
        "ci"
    }

    async fn check(
        &self,
        _ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());
        let root = &repo_ctx.resolved_path;

        let has_ci = CI_PATHS.iter().any(|relative| root.join(relative).exists());
        if !has_ci {
            builder = builder.add_warning(Warning::new(
                "no_ci_config",
                "no recognized CI configuration found",
            ));
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}
