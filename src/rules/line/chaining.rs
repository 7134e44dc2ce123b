//! S012/W015: commands chained on one line with a bare `&` rather than the
//! success/failure-aware `&&`/`||`. Both read off the same scan; they differ
//! only in how many bare separators trip the threshold.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;

/// Counts `&` characters that are not quoted, not caret-escaped, and not
/// part of an `&&` pair.
fn count_bare_ampersands(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut count = 0usize;
    let mut i = 0usize;
    while i < chars.len() {
        let ch = chars[i];
        if escaped {
            escaped = false;
            i += 1;
            continue;
        }
        match ch {
            '^' if !in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '&' if !in_quotes => {
                if chars.get(i + 1) == Some(&'&') {
                    i += 1; // skip the pair entirely
                } else {
                    count += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    count
}

/// W015: at least one command chained with a bare `&`, silently ignoring
/// whether the preceding command failed.
pub struct BareAmpersandChain;

impl LineRule for BareAmpersandChain {
    fn code(&self) -> &'static str {
        "W015"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if count_bare_ampersands(&line.text) >= 1 {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

/// S012: three or more statements crammed onto one line via bare `&`.
pub struct DenseStatementChain;

impl LineRule for DenseStatementChain {
    fn code(&self) -> &'static str {
        "S012"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if count_bare_ampersands(&line.text) >= 2 {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{LineKind, Suppression};
    use std::collections::HashSet;

    fn code_line(text: &str) -> Line {
        Line {
            index: 1,
            text: text.to_string(),
            kind: LineKind::Code,
            suppressions: Suppression {
                codes: HashSet::new(),
                suppress_all: false,
            },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn double_ampersand_not_flagged() {
        let ctx = AnalysisContext::new();
        assert!(BareAmpersandChain.check(&code_line("echo a && echo b"), &ctx).is_empty());
    }

    #[test]
    fn single_bare_ampersand_flagged_w015() {
        let ctx = AnalysisContext::new();
        let diags = BareAmpersandChain.check(&code_line("echo a & echo b"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn three_statements_flagged_s012() {
        let ctx = AnalysisContext::new();
        let diags = DenseStatementChain.check(&code_line("echo a & echo b & echo c"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn two_statements_not_flagged_s012() {
        let ctx = AnalysisContext::new();
        assert!(DenseStatementChain.check(&code_line("echo a & echo b"), &ctx).is_empty());
    }

    #[test]
    fn ampersand_inside_quotes_ignored() {
        let ctx = AnalysisContext::new();
        assert!(BareAmpersandChain.check(&code_line(r#"echo "a & b""#), &ctx).is_empty());
    }
}
