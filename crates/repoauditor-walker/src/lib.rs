//! Recursive file enumeration with include-extension and exclude-path rules.
//!
//! `find_files` is the one place every checker and analyzer goes to read a
//! repository's tree: it yields absolute paths, is finite, and is not
//! restartable (callers collect the iterator into a `Vec` if they need to
//! scan twice).

use globset::Glob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What to look for and what to skip while walking a repository.
#[derive(Debug, Clone)]
pub struct FilePattern {
    /// Case-sensitive dot-suffixes to match, without the leading dot (`"go"`, `"java"`).
    pub extensions: Vec<String>,
    /// Exclusion entries. An entry ending in `/` prunes a matching directory
    /// subtree; any other entry is glob-matched against the path relative to
    /// the walk root.
    pub exclude: Vec<String>,
}

impl FilePattern {
    #[must_use]
    pub fn new(extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_exclude(mut self, exclude: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }

    fn matches_extension(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.iter().any(|wanted| wanted == ext),
            None => false,
        }
    }

    fn directory_excludes(&self) -> Vec<&str> {
        self.exclude
            .iter()
            .filter(|e| e.ends_with('/'))
            .map(|e| e.trim_end_matches('/'))
            .collect()
    }

    fn glob_excludes(&self) -> Vec<&str> {
        self.exclude.iter().filter(|e| !e.ends_with('/')).map(String::as_str).collect()
    }

    /// Whether a single path (already known to exist) matches this pattern's
    /// extension and isn't ruled out by a directory or glob exclude. Used by
    /// analyzer registries to pick the right analyzer for one file, as
    /// opposed to [`find_files`]'s whole-tree walk.
    #[must_use]
    pub fn matches_path(&self, path: &Path) -> bool {
        if !self.matches_extension(path) {
            return false;
        }
        let path_str = path.to_string_lossy();
        let excluded_by_dir = self
            .directory_excludes()
            .iter()
            .any(|dir| path.components().any(|c| c.as_os_str() == *dir));
        if excluded_by_dir {
            return false;
        }
        !self.glob_excludes().iter().any(|pattern| {
            Glob::new(pattern)
                .map(|g| g.compile_matcher().is_match(path_str.as_ref()))
                .unwrap_or(false)
        })
    }
}

/// `.go`, excluding `vendor/`, `_test.go` files, and virtualenv-like directories.
#[must_use]
pub fn go_file_pattern() -> FilePattern {
    FilePattern::new(["go"]).with_exclude([
        "vendor/",
        "venv/",
        ".venv/",
        "*_test.go",
    ])
}

/// `.java`, excluding `target/` and `build/`.
#[must_use]
pub fn java_file_pattern() -> FilePattern {
    FilePattern::new(["java"]).with_exclude(["target/", "build/"])
}

/// `.js .ts .jsx .tsx`, excluding `node_modules/`, `dist/`, `build/`.
#[must_use]
pub fn javascript_file_pattern() -> FilePattern {
    FilePattern::new(["js", "ts", "jsx", "tsx"]).with_exclude(["node_modules/", "dist/", "build/"])
}

/// `.py`, excluding `__pycache__/`, `venv/`, `.venv/`, `site-packages/`, `.tox/`.
#[must_use]
pub fn python_file_pattern() -> FilePattern {
    FilePattern::new(["py"]).with_exclude([
        "__pycache__/",
        "venv/",
        ".venv/",
        "site-packages/",
        ".tox/",
    ])
}

/// `.c .cpp .h .hpp`, same venv/build excludes as the JVM/Python patterns.
#[must_use]
pub fn c_file_pattern() -> FilePattern {
    FilePattern::new(["c", "cpp", "h", "hpp"]).with_exclude(["build/", "venv/", ".venv/"])
}

/// Walk `root` recursively, yielding absolute paths to every file matching
/// `pattern`. Directory entries matching a `/`-suffixed exclude have their
/// entire subtree pruned; errors opening an individual entry (permission,
/// a broken symlink, …) are swallowed and the entry is skipped. An error
/// opening `root` itself is surfaced.
pub fn find_files(root: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>, std::io::Error> {
    if !root.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("walk root does not exist: {}", root.display()),
        ));
    }

    let dir_excludes = pattern.directory_excludes();
    let glob_excludes: Vec<_> = pattern
        .glob_excludes()
        .into_iter()
        .filter_map(|g| Glob::new(g).ok())
        .map(|g| g.compile_matcher())
        .collect();

    let mut out = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if !entry.file_type().is_dir() {
            return true;
        }
        let Some(name) = entry.file_name().to_str() else {
            return true;
        };
        !dir_excludes.iter().any(|excluded| *excluded == name)
    });

    for entry in walker {
        let Ok(entry) = entry else { continue };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !pattern.matches_extension(path) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if glob_excludes.iter().any(|matcher| matcher.is_match(relative)) {
            continue;
        }
        out.push(path.to_path_buf());
    }

    Ok(out)
}

/// Return files under `root` whose base name matches a shell glob (e.g.
/// `"*.md"`, `"Dockerfile*"`). Used for broad scans that aren't tied to a
/// single language's [`FilePattern`].
pub fn find_files_simple(root: &Path, glob: &str) -> Result<Vec<PathBuf>, std::io::Error> {
    if !root.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("walk root does not exist: {}", root.display()),
        ));
    }

    let matcher = Glob::new(glob)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?
        .compile_matcher();

    let mut out = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if matcher.is_match(name) {
                out.push(entry.path().to_path_buf());
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_files_matching_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "main.go", "package main");
        write(temp.path(), "README.md", "hello");

        let files = find_files(temp.path(), &go_file_pattern()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.go"));
    }

    #[test]
    fn prunes_excluded_directory_subtree() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/main.go", "package main");
        write(temp.path(), "vendor/pkg/dep.go", "package pkg");

        let files = find_files(temp.path(), &go_file_pattern()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/main.go"));
    }

    #[test]
    fn excludes_test_files_by_glob() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "main.go", "package main");
        write(temp.path(), "main_test.go", "package main");

        let files = find_files(temp.path(), &go_file_pattern()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.go"));
    }

    #[test]
    fn root_open_error_is_surfaced() {
        let missing = Path::new("/definitely/does/not/exist/anywhere");
        assert!(find_files(missing, &go_file_pattern()).is_err());
    }

    #[test]
    fn matches_path_respects_extension_and_directory_exclude() {
        let pattern = go_file_pattern();
        assert!(pattern.matches_path(Path::new("/repo/src/main.go")));
        assert!(!pattern.matches_path(Path::new("/repo/src/main.py")));
        assert!(!pattern.matches_path(Path::new("/repo/vendor/pkg/dep.go")));
        assert!(!pattern.matches_path(Path::new("/repo/x_test.go")));
    }

    #[test]
    fn find_files_simple_matches_basenames() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/SPEC.md", "spec");
        write(temp.path(), "docs/notes.txt", "notes");

        let files = find_files_simple(temp.path(), "*.md").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("SPEC.md"));
    }
}
