//! P003-P006, P008, P018, P019, P023, P024, P026, W032, W034, S034: the
//! SETLOCAL/ENDLOCAL scope family. All derived from one sequential scan that
//! tracks a stack of open scopes, since every one of these checks needs to
//! know what happened between a SETLOCAL and its matching ENDLOCAL.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

static SETLOCAL_LINE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*(setlocal)\b(.*)$").unwrap());
static ENDLOCAL_LINE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*(endlocal)\b").unwrap());
static SET_ASSIGN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"(?i)^\s*set\s+(/a\s+|/p\s+)?"?[A-Za-z_]"#).unwrap());
static DELAYED_REF: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"!\w+!").unwrap());
static EXTENSION_DEPENDENT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)\bfor\s+/f\b|\bif\s+/i\b|\bset\s+/a\b|%~").unwrap());

struct Frame {
    open_line: usize,
    open_spelling: String,
    delayed_here: bool,
    extensions_disabled_here: bool,
    inherited_delayed: bool,
    has_set: bool,
    used_delayed_ref: bool,
    child_setlocal_count: usize,
    body_lines: usize,
    uses_extension_syntax: bool,
}

struct ScanResult {
    p003_no_set: Vec<usize>,
    p004_unused_delayed: Vec<usize>,
    p005_unmatched_endlocal: Vec<usize>,
    p006_left_open: Vec<usize>,
    p008_whole_script_delayed: Vec<usize>,
    p018_single_command: Vec<usize>,
    p019_back_to_back: Vec<usize>,
    p023_excessive_nesting: Vec<usize>,
    p024_immediately_closed: Vec<usize>,
    p026_redundant_nested_delayed: Vec<usize>,
    w032_missing_enableextensions: Vec<usize>,
    s034_keyword_casing: Vec<usize>,
}

const MAX_REASONABLE_DEPTH: usize = 3;

fn scan(lines: &[Line]) -> ScanResult {
    let mut result = ScanResult {
        p003_no_set: Vec::new(),
        p004_unused_delayed: Vec::new(),
        p005_unmatched_endlocal: Vec::new(),
        p006_left_open: Vec::new(),
        p008_whole_script_delayed: Vec::new(),
        p018_single_command: Vec::new(),
        p019_back_to_back: Vec::new(),
        p023_excessive_nesting: Vec::new(),
        p024_immediately_closed: Vec::new(),
        p026_redundant_nested_delayed: Vec::new(),
        w032_missing_enableextensions: Vec::new(),
        s034_keyword_casing: Vec::new(),
    };
    let mut stack: Vec<Frame> = Vec::new();
    let mut setlocal_spelling: Option<String> = None;
    let mut endlocal_spelling: Option<String> = None;
    let mut last_endlocal_line: Option<usize> = None;

    let code_lines: Vec<&Line> = lines.iter().filter(|l| l.is_code()).collect();

    for (pos, line) in code_lines.iter().enumerate() {
        if let Some(caps) = SETLOCAL_LINE.captures(&line.text) {
            let spelling = caps.get(1).unwrap().as_str().to_string();
            match &setlocal_spelling {
                Some(first) if *first != spelling => result.s034_keyword_casing.push(line.index),
                Some(_) => {}
                None => setlocal_spelling = Some(spelling.clone()),
            }

            let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_ascii_uppercase();
            let delayed_here = rest.contains("ENABLEDELAYEDEXPANSION");
            let extensions_disabled_here = rest.contains("DISABLEEXTENSIONS");
            let inherited_delayed = stack.last().is_some_and(|f| f.delayed_here || f.inherited_delayed);

            if delayed_here && inherited_delayed {
                result.p026_redundant_nested_delayed.push(line.index);
            }

            if let Some(prev_endlocal) = last_endlocal_line {
                if pos > 0 && code_lines[pos - 1].index == prev_endlocal {
                    result.p019_back_to_back.push(line.index);
                }
            }

            if let Some(parent) = stack.last_mut() {
                parent.child_setlocal_count += 1;
            }

            stack.push(Frame {
                open_line: line.index,
                open_spelling: spelling,
                delayed_here,
                extensions_disabled_here,
                inherited_delayed,
                has_set: false,
                used_delayed_ref: false,
                child_setlocal_count: 0,
                body_lines: 0,
                uses_extension_syntax: false,
            });

            if stack.len() > MAX_REASONABLE_DEPTH {
                result.p023_excessive_nesting.push(line.index);
            }
            continue;
        }

        if let Some(caps) = ENDLOCAL_LINE.captures(&line.text) {
            let spelling = caps.get(1).unwrap().as_str().to_string();
            match &endlocal_spelling {
                Some(first) if *first != spelling => result.s034_keyword_casing.push(line.index),
                Some(_) => {}
                None => endlocal_spelling = Some(spelling.clone()),
            }

            let Some(frame) = stack.pop() else {
                result.p005_unmatched_endlocal.push(line.index);
                continue;
            };

            if !frame.has_set {
                result.p003_no_set.push(frame.open_line);
            }
            if frame.delayed_here && !frame.used_delayed_ref {
                result.p004_unused_delayed.push(frame.open_line);
            }
            if frame.body_lines == 1 && !frame.has_set {
                result.p018_single_command.push(frame.open_line);
            }
            if frame.body_lines == 0 {
                result.p024_immediately_closed.push(frame.open_line);
            }
            if frame.extensions_disabled_here && frame.uses_extension_syntax {
                result.w032_missing_enableextensions.push(frame.open_line);
            }
            if frame.delayed_here && frame.child_setlocal_count == 1 && !frame.used_delayed_ref {
                result.p008_whole_script_delayed.push(frame.open_line);
            }

            last_endlocal_line = Some(line.index);
            continue;
        }

        if let Some(frame) = stack.last_mut() {
            frame.body_lines += 1;
            if SET_ASSIGN.is_match(&line.text) {
                frame.has_set = true;
            }
            if DELAYED_REF.is_match(&line.text) {
                frame.used_delayed_ref = true;
            }
            if EXTENSION_DEPENDENT.is_match(&line.text) {
                frame.uses_extension_syntax = true;
            }
        }
    }

    for frame in stack {
        result.p006_left_open.push(frame.open_line);
        let _ = frame.open_spelling;
    }

    result
}

macro_rules! setlocal_file_rule {
    ($name:ident, $code:literal, $field:ident) => {
        pub struct $name;

        impl FileRule for $name {
            fn code(&self) -> &'static str {
                $code
            }

            fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
                scan(lines).$field.into_iter().map(|line| Diagnostic::new(line, $code)).collect()
            }
        }
    };
}

setlocal_file_rule!(SetlocalWithNoSet, "P003", p003_no_set);
setlocal_file_rule!(UnusedDelayedExpansion, "P004", p004_unused_delayed);
setlocal_file_rule!(UnmatchedEndlocal, "P005", p005_unmatched_endlocal);
setlocal_file_rule!(SetlocalLeftOpen, "P006", p006_left_open);
setlocal_file_rule!(DelayedExpansionForWholeScript, "P008", p008_whole_script_delayed);
setlocal_file_rule!(UnnecessarySetlocal, "P018", p018_single_command);
setlocal_file_rule!(BackToBackSetlocal, "P019", p019_back_to_back);
setlocal_file_rule!(ExcessiveSetlocalNesting, "P023", p023_excessive_nesting);
setlocal_file_rule!(SetlocalImmediatelyClosed, "P024", p024_immediately_closed);
setlocal_file_rule!(RedundantNestedDelayedExpansion, "P026", p026_redundant_nested_delayed);
setlocal_file_rule!(MissingEnableExtensions, "W032", w032_missing_enableextensions);
setlocal_file_rule!(SetlocalKeywordCasing, "S034", s034_keyword_casing);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{LineKind, Suppression};
    use std::collections::HashSet;

    fn code(index: usize, text: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            kind: LineKind::Code,
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn setlocal_with_no_set_flagged() {
        let lines = vec![code(1, "setlocal"), code(2, "echo hi"), code(3, "endlocal")];
        let ctx = AnalysisContext::new();
        assert_eq!(SetlocalWithNoSet.check(&lines, &ctx), vec![Diagnostic::new(1, "P003")]);
    }

    #[test]
    fn setlocal_with_set_not_flagged() {
        let lines = vec![code(1, "setlocal"), code(2, "set x=1"), code(3, "endlocal")];
        let ctx = AnalysisContext::new();
        assert!(SetlocalWithNoSet.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn delayed_expansion_never_referenced_flagged() {
        let lines = vec![code(1, "setlocal enabledelayedexpansion"), code(2, "set x=1"), code(3, "endlocal")];
        let ctx = AnalysisContext::new();
        assert_eq!(UnusedDelayedExpansion.check(&lines, &ctx), vec![Diagnostic::new(1, "P004")]);
    }

    #[test]
    fn delayed_expansion_referenced_not_flagged() {
        let lines = vec![
            code(1, "setlocal enabledelayedexpansion"),
            code(2, "set x=1"),
            code(3, "echo !x!"),
            code(4, "endlocal"),
        ];
        let ctx = AnalysisContext::new();
        assert!(UnusedDelayedExpansion.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn unmatched_endlocal_flagged() {
        let lines = vec![code(1, "endlocal")];
        let ctx = AnalysisContext::new();
        assert_eq!(UnmatchedEndlocal.check(&lines, &ctx), vec![Diagnostic::new(1, "P005")]);
    }

    #[test]
    fn setlocal_left_open_at_eof_flagged() {
        let lines = vec![code(1, "setlocal"), code(2, "set x=1")];
        let ctx = AnalysisContext::new();
        assert_eq!(SetlocalLeftOpen.check(&lines, &ctx), vec![Diagnostic::new(1, "P006")]);
    }

    #[test]
    fn immediately_closed_setlocal_flagged() {
        let lines = vec![code(1, "setlocal"), code(2, "endlocal")];
        let ctx = AnalysisContext::new();
        assert_eq!(SetlocalImmediatelyClosed.check(&lines, &ctx), vec![Diagnostic::new(1, "P024")]);
    }

    #[test]
    fn back_to_back_setlocal_pairs_flagged() {
        let lines = vec![
            code(1, "setlocal"),
            code(2, "set x=1"),
            code(3, "endlocal"),
            code(4, "setlocal"),
            code(5, "set y=2"),
            code(6, "endlocal"),
        ];
        let ctx = AnalysisContext::new();
        assert_eq!(BackToBackSetlocal.check(&lines, &ctx), vec![Diagnostic::new(4, "P019")]);
    }

    #[test]
    fn keyword_casing_mismatch_flagged() {
        let lines = vec![code(1, "setlocal"), code(2, "endlocal"), code(3, "SETLOCAL"), code(4, "ENDLOCAL")];
        let ctx = AnalysisContext::new();
        let diags = SetlocalKeywordCasing.check(&lines, &ctx);
        assert!(diags.iter().any(|d| d.line_number == 3));
    }
}
