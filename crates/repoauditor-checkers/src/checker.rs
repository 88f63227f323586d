//! The `Checker` trait and the context passed to every invocation.

use async_trait::async_trait;
use repoauditor_config::config::model::{Config, Repository};
use repoauditor_executor::CommandExecutor;
use repoauditor_result::CheckResult;
use repoauditor_utils::error::CheckError;
use repoauditor_utils::logging::Logger;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// The immutable tuple passed into each checker invocation: which
/// repository, where it resolved to on disk, and the configuration
/// effective for it (after overrides have been applied).
#[derive(Debug, Clone)]
pub struct RepositoryContext {
    pub repository: Repository,
    pub resolved_path: PathBuf,
    pub effective_config: Config,
}

impl RepositoryContext {
    #[must_use]
    pub fn new(repository: Repository, resolved_path: PathBuf, effective_config: Config) -> Self {
        Self {
            repository,
            resolved_path,
            effective_config,
        }
    }
}

/// Per-invocation dependencies shared by every checker: the command
/// executor, a cancellation token scoped to this repository's task, and a
/// logger already carrying repository/checker fields.
#[derive(Clone)]
pub struct CheckContext {
    pub executor: CommandExecutor,
    pub cancel: CancellationToken,
    pub logger: Logger,
}

impl CheckContext {
    #[must_use]
    pub fn new(executor: CommandExecutor, cancel: CancellationToken, logger: Logger) -> Self {
        Self {
            executor,
            cancel,
            logger,
        }
    }

    /// A child context scoped to one checker, with `checker` attached to
    /// the logger for every message the checker emits.
    #[must_use]
    pub fn scoped_to(&self, checker_id: &str) -> Self {
        Self {
            executor: self.executor,
            cancel: self.cancel.clone(),
            logger: self.logger.with_field(
                "checker",
                repoauditor_utils::logging::FieldValue::Str(checker_id.to_string()),
            ),
        }
    }
}

/// A pluggable component that evaluates one aspect of repository health.
///
/// Implementations must honour `ctx.cancel` at every blocking operation
/// (each command execution and file read); the orchestration engine relies
/// on that to make cancellation actually stop work rather than merely
/// discard results.
#[async_trait]
pub trait Checker: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn category(&self) -> &str;

    /// Whether this checker applies to `repository` at all (e.g. a
    /// language-specific dependency checker skipping repositories that
    /// don't carry that language's manifest). Defaults to "always".
    fn supports_repository(&self, _repository: &Repository) -> bool {
        true
    }

    /// Run the check. Checkers return a `CheckResult` for every outcome
    /// they can anticipate (missing optional tool, no config found, …);
    /// `Err` is reserved for conditions the checker itself cannot recover
    /// from, which the registry converts into a critical `execution_error`
    /// result rather than aborting the batch.
    async fn check(
        &self,
        ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError>;
}
