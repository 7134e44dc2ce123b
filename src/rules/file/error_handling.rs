//! W008/W012/W026: error-path and branch-completeness checks that need to
//! look past a single line — whether the next line checks for failure,
//! whether any PUSHD exists anywhere, whether an opened IF block ever closes
//! into an ELSE.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

static FALLIBLE_COMMAND: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^\s*(copy|move|del|erase|md|mkdir|rd|rmdir|ren|rename|xcopy|robocopy|net\s+use|net\s+start|net\s+stop|sc\s+start|sc\s+stop)\b").unwrap()
});
static ERROR_CHECK: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)errorlevel|&&|\|\|").unwrap());

/// W008: a fallible command's own line has no `&&`/`||` guard, and the very
/// next code line neither checks `%ERRORLEVEL%` nor chains on success/failure.
pub struct MissingErrorCheck;

impl FileRule for MissingErrorCheck {
    fn code(&self) -> &'static str {
        "W008"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let code_lines: Vec<&Line> = lines.iter().filter(|l| l.is_code()).collect();
        let mut diags = Vec::new();
        for (i, line) in code_lines.iter().enumerate() {
            if !FALLIBLE_COMMAND.is_match(&line.text) || ERROR_CHECK.is_match(&line.text) {
                continue;
            }
            let next_checks = code_lines.get(i + 1).is_some_and(|n| ERROR_CHECK.is_match(&n.text));
            if !next_checks {
                diags.push(Diagnostic::new(line.index, self.code()));
            }
        }
        diags
    }
}

static CHANGE_DIR: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*(cd|chdir)\s+(/d\s+)?\S").unwrap());
static PUSHD_ANYWHERE: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*pushd\b").unwrap());

/// W012: the script changes directory with `CD`/`CHDIR` but never uses
/// `PUSHD`/`POPD` anywhere to restore the original directory.
pub struct ChangeDirWithoutPushd;

impl FileRule for ChangeDirWithoutPushd {
    fn code(&self) -> &'static str {
        "W012"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let code_lines: Vec<&Line> = lines.iter().filter(|l| l.is_code()).collect();
        if code_lines.iter().any(|l| PUSHD_ANYWHERE.is_match(&l.text)) {
            return Vec::new();
        }
        code_lines
            .iter()
            .filter(|l| CHANGE_DIR.is_match(&l.text))
            .map(|l| Diagnostic::new(l.index, self.code()))
            .collect()
    }
}

fn paren_delta(text: &str) -> i64 {
    let mut delta = 0i64;
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '^' if !in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => delta += 1,
            ')' if !in_quotes => delta -= 1,
            _ => {}
        }
    }
    delta
}

static IF_BLOCK_OPEN: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*if\b.*\(\s*$").unwrap());
static ELSE_CLAUSE: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*\)?\s*else\b").unwrap());

/// W026: an `IF (...)` block closes with no `ELSE` anywhere after it.
/// Restricted to the block form (spec.md §9: single-line guard clauses are
/// too common to flag without excessive noise).
pub struct IfBlockWithoutElse;

impl FileRule for IfBlockWithoutElse {
    fn code(&self) -> &'static str {
        "W026"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let code_lines: Vec<&Line> = lines.iter().filter(|l| l.is_code()).collect();
        let mut diags = Vec::new();

        for (i, line) in code_lines.iter().enumerate() {
            if !IF_BLOCK_OPEN.is_match(&line.text) {
                continue;
            }
            let mut depth = paren_delta(&line.text);
            let mut j = i + 1;
            while j < code_lines.len() && depth > 0 {
                depth += paren_delta(&code_lines[j].text);
                j += 1;
            }
            if depth > 0 {
                continue; // never closes; reachability/paren rules cover that separately
            }
            let closed_on_same_line = code_lines.get(j - 1).is_some_and(|l| ELSE_CLAUSE.is_match(&l.text));
            let next_line_has_else = code_lines.get(j).is_some_and(|l| ELSE_CLAUSE.is_match(&l.text));
            if !closed_on_same_line && !next_line_has_else {
                diags.push(Diagnostic::new(line.index, self.code()));
            }
        }
        diags
    }
}

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
    fn fallible_command_without_check_flagged() {
        let lines = vec![code(1, "copy a.txt b.txt"), code(2, "echo done")];
        let ctx = AnalysisContext::new();
        assert_eq!(MissingErrorCheck.check(&lines, &ctx), vec![Diagnostic::new(1, "W008")]);
    }

    #[test]
    fn fallible_command_with_errorlevel_check_not_flagged() {
        let lines = vec![code(1, "copy a.txt b.txt"), code(2, "if errorlevel 1 goto fail")];
        let ctx = AnalysisContext::new();
        assert!(MissingErrorCheck.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn fallible_command_chained_with_and_and_not_flagged() {
        let lines = vec![code(1, "copy a.txt b.txt && echo ok")];
        let ctx = AnalysisContext::new();
        assert!(MissingErrorCheck.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn cd_without_pushd_anywhere_flagged() {
        let lines = vec![code(1, "cd C:\\tools")];
        let ctx = AnalysisContext::new();
        assert_eq!(ChangeDirWithoutPushd.check(&lines, &ctx), vec![Diagnostic::new(1, "W012")]);
    }

    #[test]
    fn cd_with_pushd_present_not_flagged() {
        let lines = vec![code(1, "pushd C:\\tools"), code(2, "cd sub")];
        let ctx = AnalysisContext::new();
        assert!(ChangeDirWithoutPushd.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn if_block_without_else_flagged() {
        let lines = vec![code(1, "if exist a.txt ("), code(2, "echo found"), code(3, ")")];
        let ctx = AnalysisContext::new();
        assert_eq!(IfBlockWithoutElse.check(&lines, &ctx), vec![Diagnostic::new(1, "W026")]);
    }

    #[test]
    fn if_block_with_else_not_flagged() {
        let lines = vec![
            code(1, "if exist a.txt ("),
            code(2, "echo found"),
            code(3, ") else ("),
            code(4, "echo missing"),
            code(5, ")"),
        ];
        let ctx = AnalysisContext::new();
        assert!(IfBlockWithoutElse.check(&lines, &ctx).is_empty());
    }
}
