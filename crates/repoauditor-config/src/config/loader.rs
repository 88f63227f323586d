//! Loading a [`Config`] and a repository list from YAML documents on disk.

use crate::config::model::{Config, Repository};
use repoauditor_utils::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Parse a YAML document into a [`Config`], with defaults filled in by
/// `serde`'s field-level `#[serde(default = ...)]` annotations (see
/// [`crate::config::model`]). Unknown top-level keys (`reporters`, …) are
/// ignored rather than rejected.
pub fn load_config_str(yaml: &str) -> Result<Config, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::InvalidFile {
        path: "<string>".to_string(),
        reason: e.to_string(),
    })
}

/// Read and parse a config file from disk.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
        path: path.display().to_string(),
    })?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::InvalidFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct RepositoryEntry {
    name: String,
    url: Option<String>,
    #[serde(default)]
    tags: std::collections::HashSet<String>,
    path: Option<String>,
    branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepositoryListFile {
    repositories: Vec<RepositoryEntry>,
}

/// Resolve a repository's checkout path. When the list file leaves `path`
/// empty, fall back to `./<name>`, mirroring (and making explicit) the
/// legacy `getRepoPath` fallback.
fn resolve_repo_path(name: &str, path: Option<String>) -> String {
    match path {
        Some(p) if !p.trim().is_empty() => p,
        _ => format!("./{name}"),
    }
}

/// Read a repository list file (`{repositories: [...]}`), applying an
/// optional tag filter (a repository is kept if it carries any of the
/// requested tags, or if no filter was requested).
pub fn load_repository_list(
    path: &Path,
    tag_filter: Option<&str>,
) -> Result<Vec<Repository>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
        path: path.display().to_string(),
    })?;
    let parsed: RepositoryListFile =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let repos = parsed
        .repositories
        .into_iter()
        .filter(|r| tag_filter.is_none_or(|tag| r.tags.contains(tag)))
        .map(|r| Repository {
            path: resolve_repo_path(&r.name, r.path),
            name: r.name,
            url: r.url,
            branch: r.branch,
            language: None,
            tags: r.tags,
            metadata: std::collections::HashMap::new(),
        })
        .collect();

    Ok(repos)
}
