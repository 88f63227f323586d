//! Cyclomatic complexity via line-level token counting, by explicit design
//! never an AST parse: see the decision-token tables per language.

use crate::language::Language;

/// The decision-token set counted as plain substring occurrences over a
/// file's full text, per language. File-level complexity is
/// `1 + sum(text.matches(token).count())`.
#[must_use]
pub fn file_level_tokens(language: Language) -> &'static [&'static str] {
    match language {
        Language::Go => &[
            "if ", "else if", "for ", "switch ", "case ", "default:", "&&", "||", "select ",
            "go ", "defer ",
        ],
        Language::Java | Language::C => &[
            "if (", "else if", "while (", "for (", "switch (", "case ", "default:", "catch (",
            "&&", "||", "?", ":",
        ],
        Language::JavaScript => &[
            "if (", "else if", "while (", "for (", "switch (", "case ", "default:", "catch (",
            "&&", "||", "?", ":", "=> {",
        ],
        Language::Python => &[
            "if ", "elif ", "while ", "for ", "except ", "with ", "and ", "or ", "lambda ",
            "assert ",
        ],
    }
}

/// Whole-file cyclomatic complexity: `1 + count(decision tokens)`.
#[must_use]
pub fn file_complexity(language: Language, content: &str) -> u32 {
    1 + count_tokens(file_level_tokens(language), content)
}

fn count_tokens(tokens: &[&str], text: &str) -> u32 {
    tokens.iter().map(|token| text.matches(token).count() as u32).sum()
}

/// Per-line McCabe counter (§4.8.M): unlike [`file_level_tokens`], a ternary
/// `? :` pair counts once rather than twice, and `try`/bare `else` never
/// increment. Used to accumulate a single function's complexity line by
/// line as it is walked.
#[must_use]
pub fn line_mccabe_points(language: Language, line: &str) -> u32 {
    let mut points = 0u32;

    let if_tokens: &[&str] = match language {
        Language::Go => &["if ", "else if"],
        Language::Java | Language::JavaScript | Language::C => &["if (", "else if"],
        Language::Python => &["if ", "elif "],
    };
    points += count_tokens(if_tokens, line);

    let connectors: &[&str] = match language {
        Language::Python => &["and ", "or "],
        _ => &["&&", "||"],
    };
    points += count_tokens(connectors, line);

    let loop_headers: &[&str] = match language {
        Language::Go => &["for "],
        Language::Java | Language::JavaScript | Language::C => &["while (", "for ("],
        Language::Python => &["while ", "for "],
    };
    points += count_tokens(loop_headers, line);

    let case_labels: &[&str] = match language {
        Language::Python => &[],
        _ => &["case ", "default:"],
    };
    points += count_tokens(case_labels, line);

    let exception_clauses: &[&str] = match language {
        Language::Python => &["except "],
        Language::Java | Language::JavaScript | Language::C => &["catch ("],
        Language::Go => &[],
    };
    points += count_tokens(exception_clauses, line);

    if matches!(language, Language::Java | Language::JavaScript | Language::C)
        && has_ternary(line)
    {
        points += 1;
    }

    points
}

/// A rough single-pass ternary detector: a `?` followed later on the same
/// line by a `:`. Good enough for a line-level heuristic; nested ternaries
/// on one line still only contribute 1, matching §4.8.M's "+1 per line".
fn has_ternary(line: &str) -> bool {
    line.find('?').is_some_and(|q| line[q + 1..].contains(':'))
}
