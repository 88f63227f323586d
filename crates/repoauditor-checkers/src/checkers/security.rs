//! `Security` — runs `govulncheck` for Go modules, otherwise falls back to a
//! `SECURITY.md` presence probe.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use crate::checkers::common::{run, DEFAULT_CHECK_TIMEOUT};
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, Warning};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;

const SECURITY_POLICY_CANDIDATES: &[&str] = &["SECURITY.md", ".github/SECURITY.md"];

pub struct SecurityChecker;

#[async_trait]
impl Checker for SecurityChecker {
    fn id(&self) -> &str {
        "security"
    }
    fn name(&self) -> &str {
        "Security"
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

        if path.join("go.mod").exists() {
            let available = repoauditor_executor::CommandExecutor::is_command_available("govulncheck");
            if available {
                let output = run(ctx, path, "govulncheck", &["./..."], DEFAULT_CHECK_TIMEOUT).await;
                if !output.success() {
                    builder = builder.add_issue(Issue::new(
                        "known_vulnerability",
                        Severity::Critical,
                        "govulncheck reported known vulnerabilities",
                    ));
                }
                return Ok(builder.build(&repo_ctx.repository.name));
            }
            builder = builder.add_warning(Warning::new(
                "tool_unavailable",
                "`govulncheck` is not available on PATH",
            ));
        }

        if !SECURITY_POLICY_CANDIDATES.iter().any(|relative| path.join(relative).exists()) {
            builder = builder.add_warning(Warning::new(
                "no_security_policy",
                "no SECURITY.md found",
            ));
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}
