//! Path validation used before any source file is opened by a checker or
//! analyzer.
//!
//! Deliberately simpler than a full sandbox: callers already have a
//! [`crate::types`]-scoped repository root from the walker, so this module
//! only needs to reject the two ways a crafted `exclusions`/path value could
//! point somewhere it shouldn't — `..` traversal, and an absolute path
//! outside the short list of prefixes audited machines actually use.

use std::path::{Component, Path};
use thiserror::Error;

/// Prefixes under which an absolute path is considered rooted.
const ALLOWED_ABSOLUTE_PREFIXES: &[&str] = &["/Users/", "/home/", "/tmp/", "/var/", "/opt/"];

/// Extensions recognized as source text by the complexity and deprecated-API
/// scanners.
const KNOWN_SOURCE_EXTENSIONS: &[&str] = &[
    "go", "java", "js", "jsx", "ts", "tsx", "py", "c", "h", "cc", "cpp", "hpp", "rs", "rb", "php",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathValidationError {
    #[error("path contains a parent directory component: {path}")]
    ParentTraversal { path: String },

    #[error("absolute path is not rooted under an allowed prefix: {path}")]
    UnrootedAbsolutePath { path: String },

    #[error("extension is not recognized as source text: {path}")]
    UnknownExtension { path: String },
}

/// Reject any path containing a `..` component, wherever it occurs.
pub fn reject_traversal(path: &Path) -> Result<(), PathValidationError> {
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(PathValidationError::ParentTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Require an absolute path to fall under one of the allow-listed prefixes.
/// Relative paths pass through untouched; they are resolved against a
/// repository root elsewhere.
pub fn validate_root(path: &Path) -> Result<(), PathValidationError> {
    if !path.is_absolute() {
        return Ok(());
    }
    let display = path.display().to_string();
    if ALLOWED_ABSOLUTE_PREFIXES.iter().any(|prefix| display.starts_with(prefix)) {
        Ok(())
    } else {
        Err(PathValidationError::UnrootedAbsolutePath { path: display })
    }
}

/// Require the path's extension to be recognized source text.
pub fn validate_extension(path: &Path) -> Result<(), PathValidationError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if KNOWN_SOURCE_EXTENSIONS.contains(&ext) => Ok(()),
        _ => Err(PathValidationError::UnknownExtension {
            path: path.display().to_string(),
        }),
    }
}

/// Full pipeline run before a complexity or deprecated-API routine opens a
/// file: no traversal, rooted absolute paths, recognized extension.
pub fn validate_source_path(path: &Path) -> Result<(), PathValidationError> {
    reject_traversal(path)?;
    validate_root(path)?;
    validate_extension(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn rejects_parent_dir_components_anywhere() {
        assert!(reject_traversal(&PathBuf::from("src/../../etc/passwd")).is_err());
        assert!(reject_traversal(&PathBuf::from("src/lib.rs")).is_ok());
    }

    #[test]
    fn relative_paths_skip_root_validation() {
        assert_eq!(validate_root(&PathBuf::from("src/main.go")), Ok(()));
    }

    #[test]
    fn absolute_paths_require_an_allowed_prefix() {
        assert_eq!(validate_root(&PathBuf::from("/home/dev/repo/main.go")), Ok(()));
        assert_eq!(validate_root(&PathBuf::from("/tmp/scratch/a.py")), Ok(()));
        assert!(validate_root(&PathBuf::from("/etc/shadow")).is_err());
    }

    #[test]
    fn only_known_extensions_validate() {
        assert_eq!(validate_extension(&PathBuf::from("main.go")), Ok(()));
        assert!(validate_extension(&PathBuf::from("main.exe")).is_err());
        assert!(validate_extension(&PathBuf::from("README")).is_err());
    }

    #[test]
    fn full_pipeline_stops_at_first_failure() {
        assert!(validate_source_path(&PathBuf::from("../secret.go")).is_err());
        assert!(validate_source_path(&PathBuf::from("/etc/passwd.go")).is_err());
        assert!(validate_source_path(&PathBuf::from("src/main.go")).is_ok());
    }
}
