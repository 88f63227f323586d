//! Checker registry: register/lookup/filter/execute, in registration order.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use repoauditor_config::config::model::{CheckerConfig, Repository};
use repoauditor_result::{CheckResultBuilder, Issue};
use repoauditor_utils::error::{CheckError, ErrorCode};
use repoauditor_utils::types::Severity;
use std::collections::HashMap;

/// Registered checkers, preserved in the order they were added.
///
/// `check_results` on a [`repoauditor_result::RepositoryResult`] must
/// follow registration order regardless of completion order (§4.9); the
/// registry is the single source of truth for what that order is.
#[derive(Default)]
pub struct CheckerRegistry {
    checkers: Vec<Box<dyn Checker>>,
}

impl CheckerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry pre-populated with every built-in checker (§4.7),
    /// in the order they appear in the component table.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::checkers::GitStatusChecker));
        registry.register(Box::new(crate::checkers::LastCommitChecker));
        registry.register(Box::new(crate::checkers::BranchProtectionChecker));
        registry.register(Box::new(crate::checkers::DependenciesChecker));
        registry.register(Box::new(crate::checkers::SecurityChecker));
        registry.register(Box::new(crate::checkers::LicenseChecker));
        registry.register(Box::new(crate::checkers::CiStatusChecker));
        registry.register(Box::new(crate::checkers::DocumentationChecker));
        registry.register(Box::new(crate::checkers::DeprecatedComponentsChecker));
        registry.register(Box::new(crate::checkers::CyclomaticComplexityChecker));
        registry
    }

    /// Register a checker. Re-registering an id already present replaces
    /// the previous entry in place, preserving its original position.
    pub fn register(&mut self, checker: Box<dyn Checker>) {
        let id = checker.id().to_string();
        if let Some(existing) = self.checkers.iter().position(|c| c.id() == id) {
            self.checkers[existing] = checker;
        } else {
            self.checkers.push(checker);
        }
    }

    /// Idempotent: removing an id that isn't present is a no-op.
    pub fn unregister(&mut self, id: &str) {
        self.checkers.retain(|c| c.id() != id);
    }

    pub fn get_checker(&self, id: &str) -> Result<&dyn Checker, CheckError> {
        self.checkers
            .iter()
            .find(|c| c.id() == id)
            .map(std::convert::AsRef::as_ref)
            .ok_or_else(|| {
                CheckError::new("registry", "get_checker", ErrorCode::InvalidInput)
                    .with_context("checker_id", id)
            })
    }

    /// Every registered checker, in registration order.
    #[must_use]
    pub fn all(&self) -> Vec<&dyn Checker> {
        self.checkers.iter().map(std::convert::AsRef::as_ref).collect()
    }

    #[must_use]
    pub fn get_checkers_by_category(&self, category: &str) -> Vec<&dyn Checker> {
        self.checkers.iter().filter(|c| c.category() == category).map(AsRef::as_ref).collect()
    }

    #[must_use]
    pub fn get_checkers_for_repository(&self, repository: &Repository) -> Vec<&dyn Checker> {
        self.checkers
            .iter()
            .filter(|c| c.supports_repository(repository))
            .map(AsRef::as_ref)
            .collect()
    }

    /// Checkers enabled for this run, in registration order. A checker with
    /// no entry in `config_map` is enabled by [`CheckerConfig::default`]
    /// (enabled = true).
    #[must_use]
    pub fn get_enabled_checkers(
        &self,
        config_map: &HashMap<String, CheckerConfig>,
    ) -> Vec<&dyn Checker> {
        self.checkers
            .iter()
            .filter(|c| config_map.get(c.id()).map(|cfg| cfg.enabled).unwrap_or(true))
            .map(AsRef::as_ref)
            .collect()
    }

    /// Run a single checker by id. A checker that returns `Err` is
    /// converted into a `critical` result with a single `execution_error`
    /// issue, never bubbled to the caller — per-checker failures must not
    /// abort the batch (§4.6, §7).
    pub async fn run_checker(
        &self,
        ctx: &CheckContext,
        id: &str,
        repo_ctx: &RepositoryContext,
    ) -> repoauditor_result::CheckResult {
        let checker = match self.get_checker(id) {
            Ok(checker) => checker,
            Err(error) => return execution_error_result(id, id, "unknown", &repo_ctx.repository.name, &error),
        };

        let scoped = ctx.scoped_to(checker.id());
        match checker.check(&scoped, repo_ctx).await {
            Ok(result) => result,
            Err(error) => execution_error_result(
                checker.id(),
                checker.name(),
                checker.category(),
                &repo_ctx.repository.name,
                &error,
            ),
        }
    }

    /// Run `ids` sequentially, in the order given, returning one result per
    /// id. The orchestration engine uses this for `max_concurrency <= 1`
    /// runs and tests; bounded concurrent fan-out lives in
    /// `repoauditor-engine`, which calls [`Self::run_checker`] per task
    /// instead so it can bound concurrency itself.
    pub async fn run_checkers(
        &self,
        ctx: &CheckContext,
        ids: &[&str],
        repo_ctx: &RepositoryContext,
    ) -> Vec<repoauditor_result::CheckResult> {
        let mut results = Vec::with_capacity(ids.len());
        for id in ids {
            results.push(self.run_checker(ctx, id, repo_ctx).await);
        }
        results
    }

    /// Run every checker enabled per `config_map`, in registration order.
    pub async fn run_all_enabled(
        &self,
        ctx: &CheckContext,
        config_map: &HashMap<String, CheckerConfig>,
        repo_ctx: &RepositoryContext,
    ) -> Vec<repoauditor_result::CheckResult> {
        let ids: Vec<&str> = self.get_enabled_checkers(config_map).into_iter().map(Checker::id).collect();
        self.run_checkers(ctx, &ids, repo_ctx).await
    }
}

fn execution_error_result(
    id: &str,
    name: &str,
    category: &str,
    repository: &str,
    error: &CheckError,
) -> repoauditor_result::CheckResult {
    CheckResultBuilder::new(id, name, category)
        .add_issue(Issue::new("execution_error", Severity::Critical, error.to_string()).with_context("error_code", error.code.to_string()))
        .build(repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{CheckContext, RepositoryContext};
    use async_trait::async_trait;
    use repoauditor_config::config::model::Config;
    use repoauditor_executor::CommandExecutor;
    use repoauditor_result::{CheckResultBuilder, Status};
    use repoauditor_utils::logging::Logger;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tokio_util::sync::CancellationToken;

    struct AlwaysHealthy;
    #[async_trait]
    impl Checker for AlwaysHealthy {
        fn id(&self) -> &str {
            "always-healthy"
        }
        fn name(&self) -> &str {
            "Always Healthy"
        }
        fn category(&self) -> &str {
            "quality"
        }
        async fn check(
            &self,
            _ctx: &CheckContext,
            repo_ctx: &RepositoryContext,
        ) -> Result<repoauditor_result::CheckResult, CheckError> {
            Ok(CheckResultBuilder::new(self.id(), self.name(), self.category())
                .build(&repo_ctx.repository.name))
        }
    }

    struct AlwaysErrors;
    #[async_trait]
    impl Checker for AlwaysErrors {
        fn id(&self) -> &str {
            "always-errors"
        }
        fn name(&self) -> &str {
            "Always Errors"
        }
        fn category(&self) -> &str {
            "quality"
        }
        async fn check(
            &self,
            _ctx: &CheckContext,
            _repo_ctx: &RepositoryContext,
        ) -> Result<repoauditor_result::CheckResult, CheckError> {
            Err(CheckError::new("always-errors", "check", ErrorCode::ProcessingFailed))
        }
    }

    fn repo_ctx() -> RepositoryContext {
        RepositoryContext::new(
            Repository {
                name: "demo".to_string(),
                path: "/tmp/demo".to_string(),
                url: None,
                branch: None,
                language: None,
                tags: Default::default(),
                metadata: Default::default(),
            },
            PathBuf::from("/tmp/demo"),
            Config::default(),
        )
    }

    fn check_ctx() -> CheckContext {
        CheckContext::new(CommandExecutor::new(), CancellationToken::new(), Logger::new())
    }

    #[tokio::test]
    async fn failing_checker_becomes_a_critical_execution_error_result() {
        let mut registry = CheckerRegistry::new();
        registry.register(Box::new(AlwaysErrors));

        let result = registry.run_checker(&check_ctx(), "always-errors", &repo_ctx()).await;
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.issues[0].kind, "execution_error");
    }

    #[tokio::test]
    async fn run_checkers_preserves_requested_order() {
        let mut registry = CheckerRegistry::new();
        registry.register(Box::new(AlwaysHealthy));
        registry.register(Box::new(AlwaysErrors));

        let results = registry
            .run_checkers(&check_ctx(), &["always-errors", "always-healthy"], &repo_ctx())
            .await;
        assert_eq!(results[0].id, "always-errors");
        assert_eq!(results[1].id, "always-healthy");
    }

    #[test]
    fn get_enabled_checkers_defaults_to_enabled_without_a_config_entry() {
        let mut registry = CheckerRegistry::new();
        registry.register(Box::new(AlwaysHealthy));
        let enabled = registry.get_enabled_checkers(&HashMap::new());
        assert_eq!(enabled.len(), 1);
    }

    #[test]
    fn with_builtins_registers_every_checker_once() {
        let registry = CheckerRegistry::with_builtins();
        assert_eq!(registry.all().len(), 10);
        assert!(registry.get_checker("git-status").is_ok());
        assert!(registry.get_checker("cyclomatic-complexity").is_ok());
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut registry = CheckerRegistry::new();
        registry.unregister("not-there");
        registry.register(Box::new(AlwaysHealthy));
        registry.unregister("always-healthy");
        registry.unregister("always-healthy");
        assert!(registry.all().is_empty());
    }
}
