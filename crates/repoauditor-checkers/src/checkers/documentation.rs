//! `Documentation` — flags missing, too-short, or thin README files.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, Warning};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;

const README_CANDIDATES: &[&str] = &["README.md", "README.rst", "README.txt", "README"];
const MIN_README_BYTES: u64 = 100;
const COMMON_SECTIONS: &[&str] = &["installation", "usage", "contributing", "license", "api", "examples"];
const MIN_SECTIONS_PRESENT: usize = 2;

pub struct DocumentationChecker;

#[async_trait]
impl Checker for DocumentationChecker {
    fn id(&self) -> &str {
        "documentation"
    }
    fn name(&self) -> &str {
        "Documentation"
    }
    fn category(&self) -> &str {
        "documentation"
    }

    async fn check(
        &self,
        _ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());
        let root = &repo_ctx.resolved_path;

        let readme = README_CANDIDATES.iter().map(|name| root.join(name)).find(|path| path.exists());

        let Some(readme) = readme else {
            builder = builder.add_issue(Issue::new(
                "missing_readme",
                Severity::High,
                "no README file found at the repository root",
            ));
            return Ok(builder.build(&repo_ctx.repository.name));
        };

        let contents = std::fs::read_to_string(&readme).unwrap_or_default();
        if (contents.len() as u64) < MIN_README_BYTES {
            builder = builder.add_warning(Warning::new(
                "readme_too_short",
                format!("README is only {} bytes", contents.len()),
            ));
            return Ok(builder.build(&repo_ctx.repository.name));
        }

        let lowered = contents.to_lowercase();
        let sections_present = COMMON_SECTIONS.iter().filter(|section| lowered.contains(**section)).count();
        if sections_present < MIN_SECTIONS_PRESENT {
            builder = builder.add_warning(
                Warning::new(
                    "missing_common_sections",
                    format!("README covers only {sections_present}/{} common sections", COMMON_SECTIONS.len()),
                )
                .with_suggestion("add installation/usage/contributing sections"),
            );
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
    async fn missing_readme_is_critical() {
        let dir = TempDir::new().unwrap();
        let result = DocumentationChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.issues[0].kind, "missing_readme");
    }

    #[tokio::test]
    async fn tiny_readme_is_a_warning() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README.md"), "short").unwrap();
        let result = DocumentationChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.warnings[0].kind, "readme_too_short");
    }

    #[tokio::test]
    async fn thorough_readme_is_healthy() {
        let dir = TempDir::new().unwrap();
        let body = "# Demo\n\n## Installation\n\n...\n\n## Usage\n\n...\n\n".repeat(3);
        std::fs::write(dir.path().join("README.md"), body).unwrap();
        let result = DocumentationChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Healthy);
    }

    #[tokio::test]
    async fn readme_missing_sections_is_a_warning() {
        let dir = TempDir::new().unwrap();
        let body = "x".repeat(200);
        std::fs::write(dir.path().join("README.md"), body).unwrap();
        let result = DocumentationChecker.check(&ctx(), &repo_ctx(dir.path())).await.unwrap();
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.warnings[0].kind, "missing_common_sections");
    }
}
