//! `DeprecatedComponents` — scans source files for known-deprecated APIs.

use crate::checker::{CheckContext, Checker, RepositoryContext};
use async_trait::async_trait;
use repoauditor_result::{CheckResult, CheckResultBuilder, Issue, Location};
use repoauditor_utils::error::CheckError;
use repoauditor_utils::types::Severity;
use repoauditor_walker::FilePattern;
use std::path::Path;

pub struct DeprecatedComponentsChecker;

/// One dictionary entry: a case-insensitive substring or key pattern to
/// look for, the severity of a hit, and the suggested replacement.
struct Deprecation {
    pattern: &'static str,
    severity: Severity,
    suggestion: &'static str,
}

/// Supported text files, excluding `.git`, `node_modules`, `vendor`,
/// `target` (§4.7). Extensions are the union of every analyzer language
/// plus a few common scripting/doc formats the analyzers don't own.
fn scan_pattern() -> FilePattern {
    FilePattern::new([
        "go", "java", "js", "ts", "jsx", "tsx", "py", "c", "cpp", "h", "hpp",
    ])
    .with_exclude([".git/", "node_modules/", "vendor/", "target/"])
}

fn deprecations_for(path: &Path) -> &'static [Deprecation] {
    match path.extension().and_then(|e| e.to_str()) {
        Some("go") => &[
            Deprecation {
                pattern: "ioutil.readfile",
                severity: Severity::Low,
                suggestion: "use os.ReadFile instead of ioutil.ReadFile",
            },
            Deprecation {
                pattern: "ioutil.readall",
                severity: Severity::Low,
                suggestion: "use io.ReadAll instead of ioutil.ReadAll",
            },
            Deprecation {
                pattern: "ioutil.writefile",
                severity: Severity::Low,
                suggestion: "use os.WriteFile instead of ioutil.WriteFile",
            },
            Deprecation {
                pattern: "rand.seed(",
                severity: Severity::Info,
                suggestion: "math/rand is automatically seeded since Go 1.20; drop the explicit Seed call",
            },
        ],
        Some("java") => &[
            Deprecation {
                pattern: "new integer(",
                severity: Severity::Low,
                suggestion: "use Integer.valueOf instead of the deprecated Integer constructor",
            },
            Deprecation {
                pattern: "javax.xml.bind",
                severity: Severity::Medium,
                suggestion: "javax.xml.bind was removed from the JDK; depend on jakarta.xml.bind explicitly",
            },
            Deprecation {
                pattern: "sun.misc.unsafe",
                severity: Severity::Medium,
                suggestion: "sun.misc.Unsafe is an internal API slated for removal; use VarHandle instead",
            },
        ],
        Some("js" | "ts" | "jsx" | "tsx") => &[
            Deprecation {
                pattern: "new buffer(",
                severity: Severity::Medium,
                suggestion: "Buffer() is deprecated and unsafe; use Buffer.from/Buffer.alloc",
            },
            Deprecation {
                pattern: "componentwillmount",
                severity: Severity::Low,
                suggestion: "componentWillMount is deprecated; use the constructor or componentDidMount",
            },
            Deprecation {
                pattern: "componentwillreceiveprops",
                severity: Severity::Low,
                suggestion: "componentWillReceiveProps is deprecated; use getDerivedStateFromProps",
            },
        ],
        Some("py") => &[
            Deprecation {
                pattern: "assertequals(",
                severity: Severity::Info,
                suggestion: "assertEquals is a deprecated alias; use assertEqual",
            },
            Deprecation {
                pattern: "imp.load_source",
                severity: Severity::Medium,
                suggestion: "the imp module is removed in Python 3.12; use importlib",
            },
            Deprecation {
                pattern: "distutils",
                severity: Severity::Medium,
                suggestion: "distutils is removed from the standard library; use setuptools/packaging",
            },
        ],
        Some("c" | "cpp" | "h" | "hpp") => &[
            Deprecation {
                pattern: "gets(",
                severity: Severity::High,
                suggestion: "gets() was removed from the C standard; use fgets()",
            },
            Deprecation {
                pattern: "std::auto_ptr",
                severity: Severity::Medium,
                suggestion: "std::auto_ptr was removed in C++17; use std::unique_ptr",
            },
        ],
        _ => &[],
    }
}

#[async_trait]
impl Checker for DeprecatedComponentsChecker {
    fn id(&self) -> &str {
        "deprecated-components"
    }
    fn name(&self) -> &str {
        "Deprecated Components"
    }
    fn category(&self) -> &str {
        "quality"
    }

    async fn check(
        &self,
        _ctx: &CheckContext,
        repo_ctx: &RepositoryContext,
    ) -> Result<CheckResult, CheckError> {
        let path = &repo_ctx.resolved_path;
        let mut builder = CheckResultBuilder::new(self.id(), self.name(), self.category());

        let files = repoauditor_walker::find_files(path, &scan_pattern()).unwrap_or_default();

        for file in &files {
            let dictionary = deprecations_for(file);
            if dictionary.is_empty() {
                continue;
            }
            if repoauditor_utils::paths::validate_source_path(file).is_err() {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(file) else {
                continue;
            };
            let relative = file.strip_prefix(path).unwrap_or(file).display().to_string();

            for (line_no, line) in content.lines().enumerate() {
                let lowered = line.to_lowercase();
                for deprecation in dictionary {
                    if lowered.contains(deprecation.pattern) {
                        builder = builder.add_issue(
                            Issue::new(
                                "deprecated_component",
                                deprecation.severity,
                                format!("use of a deprecated component: {}", deprecation.pattern),
                            )
                            .with_location(Location::new(relative.clone(), (line_no + 1) as u32, 0))
                            .with_suggestion(deprecation.suggestion),
                        );
                    }
                }
            }
        }

        Ok(builder.build(&repo_ctx.repository.name))
    }
}
