//! Supported analyzer languages and their file patterns.

use repoauditor_walker::{
    c_file_pattern, go_file_pattern, java_file_pattern, javascript_file_pattern,
    python_file_pattern, FilePattern,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Go,
    Java,
    JavaScript,
    Python,
    C,
}

impl Language {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::C => "c",
        }
    }

    #[must_use]
    pub fn file_pattern(self) -> FilePattern {
        match self {
            Self::Go => go_file_pattern(),
            Self::Java => java_file_pattern(),
            Self::JavaScript => javascript_file_pattern(),
            Self::Python => python_file_pattern(),
            Self::C => c_file_pattern(),
        }
    }

    #[must_use]
    pub fn all() -> &'static [Language] {
        &[Self::Go, Self::Java, Self::JavaScript, Self::Python, Self::C]
    }
}
