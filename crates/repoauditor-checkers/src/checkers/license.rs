//! `License` — flags repositories with no top-level license file.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use crate::checkers::common::any_top_level_file_matches;
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;

const LICENSE_GLOBS: &[&str] = &["LICENSE*", "LICENCE*", "COPYING*"];

pub struct LicenseChecker;

#[async_trait]
impl Checker for LicenseChecker {
    fn id(&self) -> &str {
        "license"
    }
    fn name(&self) -> &str {
        "License"
    }
    fn category(&self) -> &str {
        "compliance"
    }

    async fn check(
        &self,
        _ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());

        if !any_top_level_file_matches(&repo_ctx.resolved_path, LICENSE_GLOBS) {
            builder = builder.add_issue(
                Issue::new(
                    "missing_license",
                    Severity::Medium,
                    "no LICENSE file found at the repository root",
                )
                .with_suggestion("add a LICENSE file, e.g. via `gh repo license`"),
            );
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}
