//! E030/E032/E033: line-continuation caret checks.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;

const MAX_CONTINUATION_CHAIN: usize = 5;

/// True if `text` ends (ignoring trailing whitespace) with an unescaped,
/// unquoted `^`, making it a line-continuation.
fn ends_with_continuation(text: &str) -> bool {
    let trimmed = text.trim_end();
    if !trimmed.ends_with('^') {
        return false;
    }
    let mut in_quotes = false;
    let mut trailing_carets = 0usize;
    for ch in trimmed.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '^' => trailing_carets += 1,
            _ => trailing_carets = 0,
        }
    }
    !in_quotes && trailing_carets % 2 == 1
}

/// E030: the file's last code line ends in a continuation caret with nothing
/// left to continue onto.
pub struct DanglingContinuation;

impl FileRule for DanglingContinuation {
    fn code(&self) -> &'static str {
        "E030"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let Some(last) = lines.iter().rev().find(|l| l.is_code()) else {
            return Vec::new();
        };
        if ends_with_continuation(&last.text) {
            vec![Diagnostic::new(last.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

/// E032: a continuation caret immediately followed by a blank line, which
/// cmd.exe treats as continuing onto nothing.
pub struct ContinuationFollowedByBlank;

impl FileRule for ContinuationFollowedByBlank {
    fn code(&self) -> &'static str {
        "E032"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for window in lines.windows(2) {
            let [a, b] = window else { continue };
            if a.is_code() && ends_with_continuation(&a.text) && b.is_blank() {
                diags.push(Diagnostic::new(a.index, self.code()));
            }
        }
        diags
    }
}

/// E033: more continuation lines chained in a row than a reader can
/// reasonably follow.
pub struct ExcessiveContinuationChain;

impl FileRule for ExcessiveContinuationChain {
    fn code(&self) -> &'static str {
        "E033"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        let mut chain_start: Option<usize> = None;
        let mut chain_len = 0usize;
        for line in lines {
            if !line.is_code() {
                continue;
            }
            if ends_with_continuation(&line.text) {
                if chain_start.is_none() {
                    chain_start = Some(line.index);
                }
                chain_len += 1;
            } else if let Some(start) = chain_start.take() {
                if chain_len > MAX_CONTINUATION_CHAIN {
                    diags.push(Diagnostic::new(start, self.code()));
                }
                chain_len = 0;
            }
        }
        if let Some(start) = chain_start {
            if chain_len > MAX_CONTINUATION_CHAIN {
                diags.push(Diagnostic::new(start, self.code()));
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

    fn blank(index: usize) -> Line {
        Line {
            index,
            text: String::new(),
            kind: LineKind::Blank,
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn trailing_caret_at_eof_flagged() {
        let lines = vec![code(1, "echo hi^")];
        let ctx = AnalysisContext::new();
        assert_eq!(DanglingContinuation.check(&lines, &ctx), vec![Diagnostic::new(1, "E030")]);
    }

    #[test]
    fn caret_inside_quotes_not_a_continuation() {
        let lines = vec![code(1, r#"echo "hi^""#)];
        let ctx = AnalysisContext::new();
        assert!(DanglingContinuation.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn continuation_then_blank_flagged() {
        let lines = vec![code(1, "echo hi^"), blank(2)];
        let ctx = AnalysisContext::new();
        assert_eq!(ContinuationFollowedByBlank.check(&lines, &ctx), vec![Diagnostic::new(1, "E032")]);
    }

    #[test]
    fn long_continuation_chain_flagged() {
        let mut lines: Vec<Line> = (1..=6).map(|i| code(i, "echo hi^")).collect();
        lines.push(code(7, "echo done"));
        let ctx = AnalysisContext::new();
        assert_eq!(ExcessiveContinuationChain.check(&lines, &ctx), vec![Diagnostic::new(1, "E033")]);
    }

    #[test]
    fn short_continuation_chain_not_flagged() {
        let lines = vec![code(1, "echo hi^"), code(2, "echo done")];
        let ctx = AnalysisContext::new();
        assert!(ExcessiveContinuationChain.check(&lines, &ctx).is_empty());
    }
}
