//! Component C2: classifies each decoded line and extracts suppression
//! directives. Pure function over [`crate::source::Script`].

use crate::source::{LineEnding, RawLine, Script};
use std::collections::HashSet;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentMarker {
    Rem,
    DoubleColon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment(CommentMarker),
    Label(String),
    Code,
}

/// A directive targeting a specific line: suppress everything, or a named
/// subset of rule codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suppression {
    pub codes: HashSet<String>,
    pub suppress_all: bool,
}

/// A fully classified line, combining the decoded text from C1 with the
/// classification and suppression bookkeeping of C2.
#[derive(Debug, Clone)]
pub struct Line {
    pub index: usize,
    pub text: String,
    pub kind: LineKind,
    pub suppressions: Suppression,
    pub original_ending: LineEnding,
}

impl Line {
    pub fn is_suppressed(&self, rule_code: &str) -> bool {
        self.suppressions.suppress_all || self.suppressions.codes.contains(rule_code)
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim_start()
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, LineKind::Comment(_))
    }

    pub fn is_code(&self) -> bool {
        matches!(self.kind, LineKind::Code)
    }
}

static IGNORE_DIRECTIVE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)LINT:IGNORE(-LINE)?\s*((?:[A-Za-z]+[0-9]+\s*,?\s*)*)").unwrap()
});

fn parse_directive(comment_text: &str) -> Option<(bool, HashSet<String>)> {
    let caps = IGNORE_DIRECTIVE.captures(comment_text)?;
    let is_same_line = caps.get(1).is_some();
    let codes_str = caps.get(2).map(|m| m.as_str()).unwrap_or("").trim();
    let codes: HashSet<String> = codes_str
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    Some((is_same_line, codes))
}

fn classify_kind(text: &str) -> LineKind {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with("::") {
        return LineKind::Comment(CommentMarker::DoubleColon);
    }
    let first_token = trimmed.split_whitespace().next().unwrap_or("");
    if first_token.eq_ignore_ascii_case("rem") {
        return LineKind::Comment(CommentMarker::Rem);
    }
    if let Some(rest) = trimmed.strip_prefix(':') {
        let name: String = rest
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '&' && *c != '(')
            .collect();
        if !name.is_empty() {
            return LineKind::Label(name);
        }
    }
    LineKind::Code
}

/// Classifies every line of `script` and resolves suppression directives.
/// `LINT:IGNORE` (no `-LINE`) applies to the next non-blank line;
/// `LINT:IGNORE-LINE` applies to the line it appears on.
pub fn classify(script: &Script) -> Vec<Line> {
    let raw: &[RawLine] = &script.lines;
    let mut kinds: Vec<LineKind> = raw.iter().map(|l| classify_kind(&l.text)).collect();
    let mut same_line: Vec<Option<(bool, HashSet<String>)>> = vec![None; raw.len()];
    let mut pending_next: Option<(bool, HashSet<String>)> = None;
    let mut next_line_target: Vec<Option<(bool, HashSet<String>)>> = vec![None; raw.len()];

    for (i, raw_line) in raw.iter().enumerate() {
        if matches!(kinds[i], LineKind::Comment(_)) {
            if let Some(directive) = parse_directive(&raw_line.text) {
                let (is_same_line, codes) = directive;
                if is_same_line {
                    same_line[i] = Some((true, codes));
                } else {
                    pending_next = Some((false, codes));
                    continue;
                }
            }
        }

        if !matches!(kinds[i], LineKind::Blank) {
            if let Some(pending) = pending_next.take() {
                next_line_target[i] = Some(pending);
            }
        }
    }

    // A line can carry both its own `-LINE` directive and an inherited
    // `IGNORE` from an earlier comment; both sets apply.
    let lines: Vec<Line> = raw
        .iter()
        .enumerate()
        .map(|(i, raw_line)| {
            let mut codes = HashSet::new();
            let mut suppress_all = false;

            if let Some((_, c)) = same_line[i].take() {
                if c.is_empty() {
                    suppress_all = true;
                } else {
                    codes.extend(c);
                }
            }
            if let Some((_, c)) = next_line_target[i].take() {
                if c.is_empty() {
                    suppress_all = true;
                } else {
                    codes.extend(c);
                }
            }

            Line {
                index: raw_line.index,
                text: raw_line.text.clone(),
                kind: std::mem::replace(&mut kinds[i], LineKind::Blank),
                suppressions: Suppression { codes, suppress_all },
                original_ending: raw_line.original_ending,
            }
        })
        .collect();

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LineEnding, LineEndingStyle};
    use std::path::PathBuf;

    fn script_from(lines: &[&str]) -> Script {
        Script {
            path: PathBuf::from("test.bat"),
            raw_bytes: Vec::new(),
            encoding: crate::source::Encoding::Utf8,
            line_ending_style: LineEndingStyle::Crlf,
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, t)| RawLine {
                    index: i + 1,
                    text: t.to_string(),
                    original_ending: LineEnding::Crlf,
                })
                .collect(),
        }
    }

    #[test]
    fn blank_line_classified() {
        let script = script_from(&["   "]);
        let lines = classify(&script);
        assert!(lines[0].is_blank());
    }

    #[test]
    fn rem_comment_classified() {
        let script = script_from(&["REM a note"]);
        let lines = classify(&script);
        assert!(lines[0].is_comment());
    }

    #[test]
    fn double_colon_always_comment_even_with_label_shape() {
        let script = script_from(&["::mylabel"]);
        let lines = classify(&script);
        assert!(lines[0].is_comment());
    }

    #[test]
    fn label_classified() {
        let script = script_from(&[":build"]);
        let lines = classify(&script);
        assert_eq!(lines[0].kind, LineKind::Label("build".to_string()));
    }

    #[test]
    fn code_classified() {
        let script = script_from(&["echo hi"]);
        let lines = classify(&script);
        assert!(lines[0].is_code());
    }

    #[test]
    fn ignore_line_suppresses_same_line() {
        let script = script_from(&["@ECHO OFF", "REM LINT:IGNORE-LINE E009", "ECHO \""]);
        let lines = classify(&script);
        assert!(lines[2].is_suppressed("E009"));
        assert!(!lines[2].is_suppressed("E001"));
    }

    #[test]
    fn ignore_applies_to_next_non_blank_line() {
        let script = script_from(&["REM LINT:IGNORE E006", "", "echo %UNDEFINED%"]);
        let lines = classify(&script);
        assert!(!lines[1].is_suppressed("E006"));
        assert!(lines[2].is_suppressed("E006"));
    }

    #[test]
    fn empty_code_list_suppresses_all_rules() {
        let script = script_from(&["REM LINT:IGNORE-LINE", "echo %UNDEFINED%"]);
        let lines = classify(&script);
        assert!(lines[0].is_suppressed("E006"));
        assert!(lines[0].is_suppressed("ANYTHING"));
    }

    #[test]
    fn double_colon_ignore_directive_accepted() {
        let script = script_from(&[":: LINT:IGNORE-LINE S011", "echo hi"]);
        let lines = classify(&script);
        assert!(lines[0].is_suppressed("S011"));
    }
}
