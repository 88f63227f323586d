//! Bounded-concurrency fan-out across repositories and, within each
//! repository, across its enabled checkers (§4.9 "Execute"/"Aggregate").
//!
//! Two independently-sized [`Semaphore`]s bound concurrency: an outer one
//! for repositories (`engine.max_concurrency`) and an inner one, sized the
//! same way per-repository, for that repository's checkers. A
//! [`CancellationToken`] is handed down as a `child_token()` per repository
//! so a whole-run cancellation (Ctrl-C, a hard deadline) propagates without
//! any shared mutable state between tasks.

use crate::plan::plan_repository;
use chrono::Utc;
use repoauditor_checkers::{CheckContext, CheckerRegistry, RepositoryContext};
use repoauditor_config::config::model::{Config, Repository};
use repoauditor_executor::CommandExecutor;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, RepositoryResult, WorkflowResult};
use repoauditor_utils::error::ErrorCode;
use repoauditor_utils::logging::{FieldValue, Logger};
use repoauditor_utils::types::Severity;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Orchestrates a full audit run: plan each repository, fan out bounded by
/// two semaphores, then aggregate into a [`WorkflowResult`].
pub struct Engine {
    registry: Arc<CheckerRegistry>,
    executor: CommandExecutor,
    logger: Logger,
}

impl Engine {
    #[must_use]
    pub fn new(registry: CheckerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            executor: CommandExecutor::new(),
            logger: Logger::new().with_prefix("engine"),
        }
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new(CheckerRegistry::with_builtins())
    }

    /// Run every repository in `repositories` against `config`, honouring
    /// `categories` (when given, narrows each repository's checker set to
    /// those tagged with one of the selected categories) and `cancel` (a
    /// cooperative, whole-run cancellation signal).
    pub async fn run(
        &self,
        config: &Config,
        repositories: &[Repository],
        categories: Option<&HashSet<String>>,
        cancel: CancellationToken,
    ) -> WorkflowResult {
        let started_at = Utc::now();
        let (logger, done) = self.logger.start_operation("run");
        logger.with_field("repositories", FieldValue::Int(repositories.len() as i64)).info("planning repositories");

        let repo_concurrency = config.engine.max_concurrency.max(1) as usize;
        let outer = Arc::new(Semaphore::new(repo_concurrency));
        let repo_deadline = config.engine.timeout;

        let mut handles = Vec::with_capacity(repositories.len());
        for repository in repositories {
            let outer = Arc::clone(&outer);
            let plan = plan_repository(&self.registry, config, repository, categories);
            let registry = Arc::clone(&self.registry);
            let executor = self.executor;
            let token = cancel.child_token();
            let logger = logger.with_field("repository", FieldValue::Str(plan.repository.name.clone()));

            handles.push(tokio::spawn(async move {
                let _permit = outer.acquire_owned().await.ok();
                run_repository(&plan, &registry, executor, &logger, repo_deadline, token).await
            }));
        }

        let mut repository_results = Vec::with_capacity(handles.len());
        for (repository, handle) in repositories.iter().zip(handles) {
            match handle.await {
                Ok(result) => repository_results.push(result),
                Err(_join_error) => {
                    let now = Utc::now();
                    repository_results.push(RepositoryResult::fatal(
                        repository.name.clone(),
                        "repository task panicked",
                        now,
                        now,
                    ));
                }
            }
        }

        done();
        let finished_at = Utc::now();
        WorkflowResult::summarize(repository_results, started_at, finished_at)
    }
}

async fn run_repository(
    plan: &crate::plan::ExecutionPlan,
    registry: &Arc<CheckerRegistry>,
    executor: CommandExecutor,
    logger: &Logger,
    repo_deadline: Duration,
    token: CancellationToken,
) -> RepositoryResult {
    let started_at = Utc::now();

    if !plan.resolved_path.exists() {
        logger.warn("repository path does not exist");
        return RepositoryResult::fatal(
            plan.repository.name.clone(),
            format!("repository path does not exist: {}", plan.resolved_path.display()),
            started_at,
            Utc::now(),
        );
    }

    let repo_ctx = RepositoryContext::new(plan.repository.clone(), plan.resolved_path.clone(), plan.effective_config.clone());
    let ctx = CheckContext::new(executor, token.clone(), logger.clone());

    let checker_concurrency = plan.effective_config.engine.max_concurrency.max(1) as usize;
    let inner = Arc::new(Semaphore::new(checker_concurrency));

    let mut handles = Vec::with_capacity(plan.checker_ids.len());
    for (index, id) in plan.checker_ids.iter().cloned().enumerate() {
        let inner = Arc::clone(&inner);
        let registry = Arc::clone(registry);
        let ctx = ctx.clone();
        let repo_ctx = repo_ctx.clone();
        let token = token.clone();
        let checker_timeout = plan
            .effective_config
            .checkers
            .get(&id)
            .map(|cfg| cfg.timeout)
            .unwrap_or(repoauditor_config::config::model::CheckerConfig::default().timeout);
        let deadline = checker_timeout.min(repo_deadline);

        handles.push(tokio::spawn(async move {
            let _permit = inner.acquire_owned().await.ok();
            let result = run_checker_with_deadline(&registry, &ctx, &id, &repo_ctx, deadline, &token).await;
            (index, result)
        }));
    }

    let mut indexed: Vec<(usize, CheckResult)> = Vec::with_capacity(handles.len());
    for handle in handles {
        if let Ok(pair) = handle.await {
            indexed.push(pair);
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    let mut check_results: Vec<CheckResult> = indexed.into_iter().map(|(_, r)| r).collect();

    if token.is_cancelled() {
        for result in &mut check_results {
            result.metadata.insert("cancelled".to_string(), "true".to_string());
        }
    }

    RepositoryResult::aggregate(plan.repository.name.clone(), check_results, None, started_at, Utc::now())
}

/// Run one checker, bounded additionally by `deadline` (the smaller of the
/// repository's overall deadline and the checker's own configured timeout)
/// and by `token`. Individual command timeouts inside the checker itself
/// (`repoauditor-executor`'s own per-command deadline) are a separate,
/// tighter bound; this one covers the checker's entire invocation, which
/// may shell out more than once.
async fn run_checker_with_deadline(
    registry: &CheckerRegistry,
    ctx: &CheckContext,
    id: &str,
    repo_ctx: &RepositoryContext,
    deadline: Duration,
    token: &CancellationToken,
) -> CheckResult {
    tokio::select! {
        biased;

        () = token.cancelled() => timeout_result(registry, id, repo_ctx, "cancelled"),
        () = tokio::time::sleep(deadline) => timeout_result(registry, id, repo_ctx, "exceeded deadline"),
        result = registry.run_checker(ctx, id, repo_ctx) => result,
    }
}

fn timeout_result(registry: &CheckerRegistry, id: &str, repo_ctx: &RepositoryContext, cause: &str) -> CheckResult {
    let (name, category) = registry
        .get_checker(id)
        .map(|c| (c.name().to_string(), c.category().to_string()))
        .unwrap_or_else(|_| (id.to_string(), "unknown".to_string()));

    CheckResultBuilder::new(id, name, category)
        .add_issue(
            Issue::new("timeout", Severity::Critical, format!("checker '{id}' {cause}"))
                .with_context("error_code", ErrorCode::Timeout.to_string()),
        )
        .build(&repo_ctx.repository.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn init_git_repo() -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        Command::new("git").arg("init").arg("-q").current_dir(dir.path()).status().expect("git init");
        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(dir.path())
            .status()
            .expect("git config email");
        Command::new("git")
            .args(["config", "user.name", "Test"])
            .current_dir(dir.path())
            .status()
            .expect("git config name");
        dir
    }

    fn repository(name: &str, path: &std::path::Path) -> Repository {
        Repository {
            name: name.to_string(),
            path: path.display().to_string(),
            url: None,
            branch: None,
            language: None,
            tags: Default::default(),
            metadata: Default::default(),
        }
    }

    #[tokio::test]
    async fn missing_repository_path_produces_a_fatal_result() {
        let engine = Engine::with_builtins();
        let repo = repository("missing", std::path::Path::new("/nonexistent/path/does-not-exist"));
        let result = engine.run(&Config::default(), &[repo], None, CancellationToken::new()).await;
        assert_eq!(result.repository_results.len(), 1);
        assert!(result.repository_results[0].fatal_error.is_some());
        assert!(result.any_orchestration_error());
    }

    #[tokio::test]
    async fn preserves_registration_order_of_checker_results() {
        let engine = Engine::with_builtins();
        let dir = init_git_repo();
        let repo = repository("demo", dir.path());
        let result = engine.run(&Config::default(), &[repo], None, CancellationToken::new()).await;

        let checker_ids: Vec<&str> = result.repository_results[0].check_results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            checker_ids,
            vec![
                "git-status",
                "last-commit",
                "branch-protection",
                "dependencies",
                "security",
                "license",
                "ci-status",
                "documentation",
                "deprecated-components",
                "cyclomatic-complexity",
            ]
        );
    }

    #[tokio::test]
    async fn cancelling_before_run_marks_every_result_cancelled() {
        let engine = Engine::with_builtins();
        let dir = init_git_repo();
        let repo = repository("demo", dir.path());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = engine.run(&Config::default(), &[repo], None, cancel).await;
        assert!(result.repository_results[0]
            .check_results
            .iter()
            .all(|r| r.metadata.get("cancelled").map(String::as_str) == Some("true")));
    }

    #[tokio::test]
    async fn multiple_repositories_each_get_their_own_result() {
        let engine = Engine::with_builtins();
        let a = init_git_repo();
        let b = init_git_repo();
        let repos = vec![repository("a", a.path()), repository("b", b.path())];
        let result = engine.run(&Config::default(), &repos, None, CancellationToken::new()).await;
        assert_eq!(result.total_repositories, 2);
    }
}
