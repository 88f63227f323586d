//! Analyzer registry: one [`Analyzer`] per supported language, looked up by
//! file path.

use crate::complexity::file_complexity;
use crate::function_level::{analyze_functions, FunctionMetrics};
use crate::language::Language;
use repoauditor_walker::FilePattern;
use std::collections::HashMap;
use std::path::Path;

/// Complexity metrics for a single analyzed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAnalysis {
    pub path: String,
    pub language: Language,
    pub file_complexity: u32,
    pub functions: Vec<FunctionMetrics>,
}

/// A language-scoped source analyzer: decides which files it owns and
/// computes file- and function-level complexity for them.
pub trait Analyzer: Send + Sync {
    fn language(&self) -> Language;
    fn file_pattern(&self) -> FilePattern;

    /// Whether this analyzer claims `path` (extension matches, not
    /// excluded).
    fn supports_path(&self, path: &Path) -> bool {
        self.file_pattern().matches_path(path)
    }

    /// Analyze one file's already-read contents.
    fn analyze(&self, path: &Path, content: &str) -> FileAnalysis {
        FileAnalysis {
            path: path.display().to_string(),
            language: self.language(),
            file_complexity: file_complexity(self.language(), content),
            functions: analyze_functions(self.language(), content),
        }
    }
}

macro_rules! language_analyzer {
    ($name:ident, $lang:expr) => {
        struct $name;
        impl Analyzer for $name {
            fn language(&self) -> Language {
                $lang
            }
            fn file_pattern(&self) -> FilePattern {
                $lang.file_pattern()
            }
        }
    };
}

language_analyzer!(GoAnalyzer, Language::Go);
language_analyzer!(JavaAnalyzer, Language::Java);
language_analyzer!(JavaScriptAnalyzer, Language::JavaScript);
language_analyzer!(PythonAnalyzer, Language::Python);
language_analyzer!(CAnalyzer, Language::C);

/// Registry of every built-in language analyzer, keyed by [`Language`].
pub struct AnalyzerRegistry {
    analyzers: HashMap<Language, Box<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Build a registry pre-populated with the five built-in analyzers
    /// (§4.8).
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            analyzers: HashMap::new(),
        };
        registry.register(Box::new(GoAnalyzer));
        registry.register(Box::new(JavaAnalyzer));
        registry.register(Box::new(JavaScriptAnalyzer));
        registry.register(Box::new(PythonAnalyzer));
        registry.register(Box::new(CAnalyzer));
        registry
    }

    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.insert(analyzer.language(), analyzer);
    }

    #[must_use]
    pub fn get(&self, language: Language) -> Option<&dyn Analyzer> {
        self.analyzers.get(&language).map(std::convert::AsRef::as_ref)
    }

    /// Find the analyzer that claims `path`, if any. Languages are checked
    /// in [`Language::all`] order; file extensions don't overlap across
    /// the built-ins so ordering only matters for a future analyzer with a
    /// broader pattern.
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn Analyzer> {
        Language::all().iter().find_map(|lang| {
            self.get(*lang).filter(|analyzer| analyzer.supports_path(path))
        })
    }

    #[must_use]
    pub fn languages(&self) -> Vec<Language> {
        Language::all().iter().filter(|l| self.analyzers.contains_key(l)).copied().collect()
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
