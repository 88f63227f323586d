//! Building a per-repository execution plan (§4.9 "Plan"): apply matching
//! overrides, then resolve the checker set enabled for that repository.

use repoauditor_checkers::CheckerRegistry;
use repoauditor_config::config::model::{Config, Repository};
use repoauditor_config::config::overrides::apply_overrides;
use std::collections::HashSet;
use std::path::PathBuf;

/// What to run for one repository: its effective (override-applied, and
/// optionally category-filtered) config, the checker ids enabled for it,
/// and the path it resolves to on disk.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub repository: Repository,
    pub resolved_path: PathBuf,
    pub effective_config: Config,
    pub checker_ids: Vec<String>,
}

/// Clone `base_config`, apply every override matching `repository` in
/// declaration order, narrow by `categories` if given, and resolve the
/// checker ids enabled for this repository specifically (its own config
/// plus [`repoauditor_checkers::checker::Checker::supports_repository`]).
///
/// Category narrowing is done against each registered checker's own
/// built-in [`repoauditor_checkers::checker::Checker::category`], not by
/// deleting entries from `effective_config.checkers`: a checker absent from
/// that map is still enabled by default (§4.5 "no config entry ⇒
/// checker's own enabled default applies"), so removing its entry from the
/// map has no effect on whether it is scheduled.
#[must_use]
pub fn plan_repository(
    registry: &CheckerRegistry,
    base_config: &Config,
    repository: &Repository,
    categories: Option<&HashSet<String>>,
) -> ExecutionPlan {
    let effective_config = apply_overrides(base_config, repository);

    let checker_ids = registry
        .get_enabled_checkers(&effective_config.checkers)
        .into_iter()
        .filter(|checker| checker.supports_repository(repository))
        .filter(|checker| categories.is_none_or(|selected| selected.contains(checker.category())))
        .map(|checker| checker.id().to_string())
        .collect();

    ExecutionPlan {
        repository: repository.clone(),
        resolved_path: PathBuf::from(&repository.path),
        effective_config,
        checker_ids,
    }
}
