//! W002/W003/W022/W023: CALL/EXIT usage within and across subroutine
//! boundaries, where a subroutine body is every line between one `:label`
//! and the next (or end of file).

use crate::classify::{Line, LineKind};
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

static EXIT_B: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*exit\s*/b\b").unwrap());
static BARE_EXIT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*exit\b(?!\s*/b)").unwrap());
static CALL_TARGET: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*call\s+(.+)$").unwrap());
static CALL_LABEL: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^:([A-Za-z_][\w]*)").unwrap());
static EXTERNAL_TARGET: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)\.(exe|bat|cmd|com)\b|[\\/]|%").unwrap());

/// Splits the file into `(label_name, first_body_line, last_body_line)`
/// spans; `label_name` is `None` for the lines before the first label.
fn subroutine_spans(lines: &[Line]) -> Vec<(Option<String>, usize, usize)> {
    let mut spans = Vec::new();
    let mut current_name: Option<String> = None;
    let mut start = lines.first().map(|l| l.index).unwrap_or(1);

    for line in lines {
        if let LineKind::Label(name) = &line.kind {
            spans.push((current_name.take(), start, line.index.saturating_sub(1)));
            current_name = Some(name.to_ascii_uppercase());
            start = line.index + 1;
        }
    }
    if let Some(last) = lines.last() {
        spans.push((current_name, start, last.index));
    }
    spans
}

/// W002: `EXIT /B` used in the script's top-level flow, before any label —
/// that flow is never itself reached via CALL, so `/B` has no caller to
/// return control to.
pub struct ExitBAtTopLevel;

impl FileRule for ExitBAtTopLevel {
    fn code(&self) -> &'static str {
        "W002"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let first_label_line = lines
            .iter()
            .find_map(|l| matches!(l.kind, LineKind::Label(_)).then_some(l.index));
        lines
            .iter()
            .filter(|l| l.is_code())
            .filter(|l| first_label_line.is_none_or(|first| l.index < first))
            .filter(|l| EXIT_B.is_match(&l.text))
            .map(|l| Diagnostic::new(l.index, self.code()))
            .collect()
    }
}

/// W003: `CALL` to a bare word that names neither a known label nor an
/// external program/script, so the engine cannot tell what it resolves to.
pub struct UnresolvedCallTarget;

impl FileRule for UnresolvedCallTarget {
    fn code(&self) -> &'static str {
        "W003"
    }

    fn check(&self, lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        lines
            .iter()
            .filter(|l| l.is_code())
            .filter_map(|line| {
                let caps = CALL_TARGET.captures(&line.text)?;
                let rest = caps.get(1)?.as_str().trim();
                if rest.starts_with(':') {
                    return None;
                }
                let target = rest.split_whitespace().next().unwrap_or(rest);
                if EXTERNAL_TARGET.is_match(target) {
                    return None;
                }
                if ctx.label_defined(target) {
                    return None;
                }
                Some(Diagnostic::new(line.index, self.code()))
            })
            .collect()
    }
}

/// W022: a subroutine calls itself with no depth-guard `IF` anywhere in its
/// own body, risking unbounded recursion.
pub struct UnguardedRecursiveCall;

impl FileRule for UnguardedRecursiveCall {
    fn code(&self) -> &'static str {
        "W022"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for (name, start, end) in subroutine_spans(lines) {
            let Some(name) = name else { continue };
            let body: Vec<&Line> = lines.iter().filter(|l| l.index >= start && l.index <= end).collect();
            let has_guard = body.iter().any(|l| l.is_code() && l.text.to_ascii_lowercase().contains("if "));
            let self_call = body.iter().any(|l| {
                l.is_code() && {
                    let lower = l.text.to_ascii_lowercase();
                    lower.contains("call") && lower.contains(&format!(":{}", name.to_ascii_lowercase()))
                }
            });
            if self_call && !has_guard {
                diags.push(Diagnostic::new(start, self.code()));
            }
        }
        diags
    }
}

/// W023: a bare `EXIT` (no `/B`) inside a subroutine body that is itself a
/// known CALL target — it ends the whole cmd.exe process instead of just
/// returning to the caller.
pub struct BareExitInsideCalledSubroutine;

impl FileRule for BareExitInsideCalledSubroutine {
    fn code(&self) -> &'static str {
        "W023"
    }

    fn check(&self, lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for (name, start, end) in subroutine_spans(lines) {
            let Some(name) = name else { continue };
            if !ctx.call_targets.contains(&name) {
                continue;
            }
            for line in lines.iter().filter(|l| l.index >= start && l.index <= end && l.is_code()) {
                if BARE_EXIT.is_match(&line.text) {
                    diags.push(Diagnostic::new(line.index, self.code()));
                }
            }
        }
        diags
    }
}
