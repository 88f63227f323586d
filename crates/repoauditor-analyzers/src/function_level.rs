//! Function-level complexity via brace-depth (Go/Java/JS) or indentation
//! (Python) tracking. A simple per-language tokenizer, not a parser: see
//! `crate::complexity` for why that is a deliberate contract, not a
//! shortcut.

use crate::complexity::line_mccabe_points;
use crate::language::Language;

/// One function/method found while walking a file, with its own McCabe
/// complexity (base 1 plus every decision point inside its body).
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionMetrics {
    pub name: String,
    pub start_line: u32,
    /// `-1` marks a synthesized file-level pseudo-function (see
    /// [`crate::report::synthesize_pseudo_function`]), never a real
    /// function.
    pub end_line: i64,
    pub complexity: u32,
}

/// Walk `content` line by line and return every function found, in source
/// order.
#[must_use]
pub fn analyze_functions(language: Language, content: &str) -> Vec<FunctionMetrics> {
    match language {
        Language::Go => brace_tracked(content, language, is_go_signature, extract_go_name),
        Language::Java => brace_tracked(content, language, is_java_signature, extract_c_like_name),
        Language::JavaScript => {
            brace_tracked(content, language, is_js_signature, extract_c_like_name)
        }
        Language::C => brace_tracked(content, language, is_c_signature, extract_c_like_name),
        Language::Python => indentation_tracked(content),
    }
}

fn is_go_signature(line: &str) -> bool {
    line.trim_start().starts_with("func ")
}

fn extract_go_name(line: &str) -> String {
    let trimmed = line.trim_start().trim_start_matches("func ").trim_start();
    // Skip a receiver like `(r *Type) ` before the method name.
    let after_receiver = if trimmed.starts_with('(') {
        trimmed.splitn(2, ')').nth(1).map(str::trim_start).unwrap_or(trimmed)
    } else {
        trimmed
    };
    after_receiver
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or("anonymous")
        .to_string()
}

fn is_java_signature(line: &str) -> bool {
    let trimmed = line.trim();
    let has_modifier = ["public ", "private ", "protected ", "static "]
        .iter()
        .any(|m| trimmed.contains(m));
    has_modifier
        && trimmed.contains('(')
        && !trimmed.ends_with(';')
        && !trimmed.starts_with("//")
        && !trimmed.starts_with('*')
}

fn is_js_signature(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with("//") {
        return false;
    }
    (trimmed.contains("function ") || trimmed.contains("function("))
        || trimmed.contains("=> {")
        || (trimmed.contains('(') && trimmed.ends_with('{') && !trimmed.starts_with('}'))
}

fn is_c_signature(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('(')
        && trimmed.ends_with(')')
        && !trimmed.ends_with(';')
        && !trimmed.starts_with("//")
        && !trimmed.starts_with('#')
}

/// Best-effort name extraction for C-family signatures: the identifier
/// immediately before the argument list's opening paren.
fn extract_c_like_name(line: &str) -> String {
    let trimmed = line.trim();
    let Some(paren) = trimmed.find('(') else {
        return "anonymous".to_string();
    };
    trimmed[..paren]
        .split(|c: char| c.is_whitespace() || c == '*')
        .filter(|s| !s.is_empty())
        .next_back()
        .unwrap_or("anonymous")
        .to_string()
}

/// Shared brace-depth walker for Go/Java/JS/C: a function opens on a
/// signature-matching line and closes once brace depth returns to the
/// depth observed when it opened.
fn brace_tracked(
    content: &str,
    language: Language,
    is_signature: impl Fn(&str) -> bool,
    extract_name: impl Fn(&str) -> String,
) -> Vec<FunctionMetrics> {
    let mut functions = Vec::new();
    let mut depth: i32 = 0;
    let mut current: Option<(String, u32, i32, u32)> = None; // name, start_line, opening_depth, complexity

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx as u32 + 1;

        if current.is_none() && is_signature(line) {
            current = Some((extract_name(line), line_no, depth, 1));
        }

        if let Some((_, _, _, complexity)) = current.as_mut() {
            *complexity += line_mccabe_points(language, line);
        }

        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if let Some((name, start_line, opening_depth, complexity)) = &current {
                        if depth <= *opening_depth {
                            functions.push(FunctionMetrics {
                                name: name.clone(),
                                start_line: *start_line,
                                end_line: i64::from(line_no),
                                complexity: *complexity,
                            });
                            current = None;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    functions
}

fn indentation_tracked(content: &str) -> Vec<FunctionMetrics> {
    let lines: Vec<&str> = content.lines().collect();
    let mut functions = Vec::new();
    let mut idx = 0usize;

    while idx < lines.len() {
        let line = lines[idx];
        let trimmed = line.trim_start();
        let is_def = trimmed.starts_with("def ") || trimmed.starts_with("async def ");

        if !is_def {
            idx += 1;
            continue;
        }

        let base_indent = indent_of(line);
        let name = extract_python_name(trimmed);
        let start_line = idx as u32 + 1;

        // Skip forward through a (possibly multi-line) signature until the
        // terminating `:` is seen.
        let mut sig_idx = idx;
        while !lines[sig_idx].contains(':') && sig_idx + 1 < lines.len() {
            sig_idx += 1;
        }
        let mut body_idx = sig_idx + 1;

        // Skip a leading docstring, single- or triple-quoted.
        if body_idx < lines.len() {
            let body_trimmed = lines[body_idx].trim_start();
            if body_trimmed.starts_with("\"\"\"") || body_trimmed.starts_with("'''") {
                let quote = &body_trimmed[..3];
                let rest_has_close = body_trimmed[3..].contains(quote);
                if !rest_has_close {
                    body_idx += 1;
                    while body_idx < lines.len() && !lines[body_idx].contains(quote) {
                        body_idx += 1;
                    }
                }
                body_idx += 1;
            }
        }

        let mut complexity = 1u32;
        let mut end_line = start_line;
        let mut cursor = body_idx;

        while cursor < lines.len() {
            let body_line = lines[cursor];
            let body_trimmed = body_line.trim();
            if body_trimmed.is_empty() || body_trimmed.starts_with('#') {
                cursor += 1;
                continue;
            }
            if indent_of(body_line) <= base_indent {
                break;
            }
            complexity += line_mccabe_points(Language::Python, body_line);
            end_line = cursor as u32 + 1;
            cursor += 1;
        }

        functions.push(FunctionMetrics {
            name,
            start_line,
            end_line: i64::from(end_line),
            complexity,
        });

        idx = cursor.max(idx + 1);
    }

    functions
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn extract_python_name(trimmed: &str) -> String {
    let after_def = trimmed.trim_start_matches("async ").trim_start_matches("def ").trim_start();
    after_def.split('(').next().unwrap_or("anonymous").trim().to_string()
}
