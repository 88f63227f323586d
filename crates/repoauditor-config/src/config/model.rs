//! Configuration data model.
//!
//! Mirrors the YAML schema in [`crate::config::loader`]: a top-level
//! [`Config`] holds engine settings plus maps of checker/analyzer/category
//! configuration keyed by id, language, and category name respectively.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// A single local checkout to audit.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Repository {
    pub name: String,
    pub path: String,
    pub url: Option<String>,
    pub branch: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub tags: HashSet<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A typed value bag for checker/analyzer `options`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Per-checker configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CheckerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default = "default_checker_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default)]
    pub categories: HashSet<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub options: HashMap<String, OptionValue>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: default_severity(),
            timeout: default_checker_timeout(),
            categories: HashSet::new(),
            exclusions: Vec::new(),
            options: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_severity() -> String {
    "medium".to_string()
}

fn default_checker_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Per-language analyzer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub file_extensions: Vec<String>,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default = "default_true")]
    pub complexity_enabled: bool,
    #[serde(default)]
    pub function_level: bool,
    #[serde(default)]
    pub options: HashMap<String, OptionValue>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_extensions: Vec::new(),
            exclude_patterns: Vec::new(),
            complexity_enabled: true,
            function_level: false,
            options: HashMap::new(),
        }
    }
}

/// Orchestration engine configuration.
///
/// ```
/// use repoauditor_config::config::model::EngineConfig;
/// let engine = EngineConfig::default();
/// assert_eq!(engine.max_concurrency, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u32,
    #[serde(default = "default_engine_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default)]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            timeout: default_engine_timeout(),
            cache_enabled: false,
            cache_ttl: default_cache_ttl(),
        }
    }
}

fn default_max_concurrency() -> u32 {
    4
}

fn default_engine_timeout() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}

/// A named category's weight and whether it is active by default.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryConfig {
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            weight: default_weight(),
            enabled: true,
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

/// A named audit profile. Not executed by the orchestration engine; carried
/// through only so the validation rule that inspects it (§4.5) has
/// something to check. See `DESIGN.md` for why this stays unexercised.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    pub description: String,
}

/// One step of a [`Pipeline`]. `depends_on` is carried through but not
/// scheduled: the engine runs the simple per-repository model described in
/// §4.9, not a step DAG. A future analyzer/checker could read `depends_on`
/// to order pipeline steps without changing this type.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PipelineStep {
    pub name: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Pipeline {
    pub steps: Vec<PipelineStep>,
}

/// Top-level configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub checkers: HashMap<String, CheckerConfig>,
    #[serde(default)]
    pub analyzers: HashMap<String, AnalyzerConfig>,
    #[serde(default)]
    pub categories: HashMap<String, CategoryConfig>,
    #[serde(default)]
    pub overrides: Vec<crate::config::overrides::Override>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub pipelines: HashMap<String, Pipeline>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            engine: EngineConfig::default(),
            checkers: HashMap::new(),
            analyzers: HashMap::new(),
            categories: HashMap::new(),
            overrides: Vec::new(),
            profiles: HashMap::new(),
            pipelines: HashMap::new(),
        }
    }
}

impl Config {
    /// Return a shallow copy keeping only checkers whose `categories`
    /// intersect `selected`. Analyzers are retained unchanged: filtering by
    /// language is out of scope here.
    #[must_use]
    pub fn filter_by_categories(&self, selected: &HashSet<String>) -> Self {
        let mut filtered = self.clone();
        filtered.checkers.retain(|_, checker| {
            checker.categories.is_empty() || !checker.categories.is_disjoint(selected)
        });
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_defaults_match_documented_values() {
        let engine = EngineConfig::default();
        assert_eq!(engine.max_concurrency, 4);
        assert_eq!(engine.timeout, Duration::from_secs(30 * 60));
        assert_eq!(engine.cache_ttl, Duration::from_secs(60 * 60));
    }

    #[test]
    fn partial_engine_block_fills_in_the_rest_from_defaults() {
        let engine: EngineConfig = serde_yaml::from_str("max_concurrency: 8\n").expect("partial engine block");
        assert_eq!(engine.max_concurrency, 8);
        assert_eq!(engine.timeout, Duration::from_secs(30 * 60));
        assert!(!engine.cache_enabled);
        assert_eq!(engine.cache_ttl, Duration::from_secs(60 * 60));
    }

    #[test]
    fn filter_by_categories_keeps_checkers_with_no_category_restriction() {
        let mut config = Config::default();
        config.checkers.insert("git-status".to_string(), CheckerConfig::default());
        let mut scoped = CheckerConfig::default();
        scoped.categories.insert("security".to_string());
        config.checkers.insert("branch-protection".to_string(), scoped);

        let selected: HashSet<String> = ["compliance".to_string()].into_iter().collect();
        let filtered = config.filter_by_categories(&selected);

        assert!(filtered.checkers.contains_key("git-status"));
        assert!(!filtered.checkers.contains_key("branch-protection"));
    }
}
