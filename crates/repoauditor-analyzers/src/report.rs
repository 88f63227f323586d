//! Aggregate complexity metrics and the detailed violation report used by
//! the `CyclomaticComplexity` checker.

use crate::function_level::FunctionMetrics;
use crate::registry::FileAnalysis;

/// Complexity threshold above which a file counts as "high complexity".
pub const HIGH_COMPLEXITY_THRESHOLD: u32 = 10;
/// Complexity threshold above which a file counts as "very high complexity".
pub const VERY_HIGH_COMPLEXITY_THRESHOLD: u32 = 20;

/// Repository-wide complexity summary across every analyzed file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexityReport {
    pub total_files: usize,
    pub total_functions: usize,
    pub average_complexity: f64,
    pub max_complexity: u32,
    pub high_complexity_files: usize,
    pub very_high_complexity_files: usize,
}

/// Aggregate per-file analyses into a single repository-wide report.
/// `average_complexity` is the mean file-level complexity, rounded to two
/// decimal places (the legacy source used integer division here; this is
/// the double-precision replacement named in §4.8).
#[must_use]
pub fn aggregate(files: &[FileAnalysis]) -> ComplexityReport {
    if files.is_empty() {
        return ComplexityReport::default();
    }

    let total_files = files.len();
    let total_functions = files.iter().map(|f| f.functions.len()).sum();
    let max_complexity = files.iter().map(|f| f.file_complexity).max().unwrap_or(0);
    let high_complexity_files =
        files.iter().filter(|f| f.file_complexity > HIGH_COMPLEXITY_THRESHOLD).count();
    let very_high_complexity_files =
        files.iter().filter(|f| f.file_complexity > VERY_HIGH_COMPLEXITY_THRESHOLD).count();

    let total: u64 = files.iter().map(|f| u64::from(f.file_complexity)).sum();
    let raw_average = total as f64 / total_files as f64;
    let average_complexity = (raw_average * 100.0).round() / 100.0;

    ComplexityReport {
        total_files,
        total_functions,
        average_complexity,
        max_complexity,
        high_complexity_files,
        very_high_complexity_files,
    }
}

/// One function (or synthesized file-level pseudo-function) exceeding the
/// configured threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub file: String,
    pub function: String,
    pub start_line: u32,
    pub end_line: i64,
    pub complexity: u32,
}

/// A file-level stand-in used when a file has no function-level data (the
/// analyzer couldn't find any recognizable function signature, or
/// function-level analysis is disabled). Named `file-level` with
/// `end_line = -1` so the reporter can still display a violation line.
#[must_use]
pub fn synthesize_pseudo_function(file: &FileAnalysis) -> FunctionMetrics {
    FunctionMetrics {
        name: "file-level".to_string(),
        start_line: 1,
        end_line: -1,
        complexity: file.file_complexity,
    }
}

/// Every function (synthesizing a file-level pseudo-function where a file
/// has none) whose complexity exceeds `max_complexity`.
#[must_use]
pub fn detailed_violations(files: &[FileAnalysis], max_complexity: u32) -> Vec<Violation> {
    let mut violations = Vec::new();
    for file in files {
        let functions: Vec<FunctionMetrics> = if file.functions.is_empty() {
            vec![synthesize_pseudo_function(file)]
        } else {
            file.functions.clone()
        };

        for function in functions {
            if function.complexity > max_complexity {
                violations.push(Violation {
                    file: file.path.clone(),
                    function: function.name,
                    start_line: function.start_line,
                    end_line: function.end_line,
                    complexity: function.complexity,
                });
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn file(path: &str, complexity: u32, functions: Vec<FunctionMetrics>) -> FileAnalysis {
        FileAnalysis {
            path: path.to_string(),
            language: Language::Go,
            file_complexity: complexity,
            functions,
        }
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let files = vec![file("a.go", 1, vec![]), file("b.go", 2, vec![])];
        let report = aggregate(&files);
        assert_eq!(report.average_complexity, 1.5);
    }

    #[test]
    fn buckets_count_files_above_thresholds() {
        let files = vec![file("a.go", 11, vec![]), file("b.go", 21, vec![]), file("c.go", 5, vec![])];
        let report = aggregate(&files);
        assert_eq!(report.high_complexity_files, 2);
        assert_eq!(report.very_high_complexity_files, 1);
        assert_eq!(report.max_complexity, 21);
    }

    #[test]
    fn empty_file_set_has_zeroed_report() {
        let report = aggregate(&[]);
        assert_eq!(report.total_files, 0);
        assert_eq!(report.average_complexity, 0.0);
    }

    #[test]
    fn synthesizes_pseudo_function_when_no_functions_found() {
        let files = vec![file("a.go", 15, vec![])];
        let violations = detailed_violations(&files, 10);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].function, "file-level");
        assert_eq!(violations[0].end_line, -1);
    }

    #[test]
    fn real_function_violations_are_reported_without_synthesis() {
        let functions = vec![FunctionMetrics {
            name: "F".to_string(),
            start_line: 2,
            end_line: 10,
            complexity: 15,
        }];
        let files = vec![file("a.go", 15, functions)];
        let violations = detailed_violations(&files, 10);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].function, "F");
    }
}
