//! P002: duplicated blocks of code, per spec.md §4.6 with the minimum block
//! length pinned at 3 (spec.md §9 open question).

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;

const MIN_BLOCK_LEN: usize = 3;

/// P002: two non-overlapping runs of at least [`MIN_BLOCK_LEN`] identical
/// non-blank, non-comment lines appearing in two locations in the file.
pub struct DuplicatedBlock;

impl FileRule for DuplicatedBlock {
    fn code(&self) -> &'static str {
        "P002"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let body: Vec<&Line> = lines.iter().filter(|l| l.is_code()).collect();
        if body.len() < MIN_BLOCK_LEN * 2 {
            return Vec::new();
        }

        let mut flagged_starts: Vec<usize> = Vec::new();
        let mut i = 0;
        while i + MIN_BLOCK_LEN <= body.len() {
            let window: Vec<&str> = body[i..i + MIN_BLOCK_LEN].iter().map(|l| l.text.trim()).collect();
            if window.iter().any(|t| t.is_empty()) {
                i += 1;
                continue;
            }

            let mut found = false;
            let mut j = i + MIN_BLOCK_LEN;
            while j + MIN_BLOCK_LEN <= body.len() {
                let candidate: Vec<&str> = body[j..j + MIN_BLOCK_LEN].iter().map(|l| l.text.trim()).collect();
                if candidate == window {
                    flagged_starts.push(body[j].index);
                    found = true;
                    break;
                }
                j += 1;
            }
            let _ = found;
            i += 1;
        }

        flagged_starts.sort_unstable();
        flagged_starts.dedup();
        flagged_starts.into_iter().map(|line| Diagnostic::new(line, self.code())).collect()
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
    fn repeated_three_line_block_flagged() {
        let lines = vec![
            code(1, "echo a"),
            code(2, "echo b"),
            code(3, "echo c"),
            code(4, "echo d"),
            code(5, "echo a"),
            code(6, "echo b"),
            code(7, "echo c"),
        ];
        let ctx = AnalysisContext::new();
        assert_eq!(DuplicatedBlock.check(&lines, &ctx), vec![Diagnostic::new(5, "P002")]);
    }

    #[test]
    fn two_identical_lines_not_flagged() {
        let lines = vec![code(1, "echo a"), code(2, "echo b"), code(3, "echo a"), code(4, "echo b")];
        let ctx = AnalysisContext::new();
        assert!(DuplicatedBlock.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn unrelated_lines_not_flagged() {
        let lines = vec![code(1, "echo a"), code(2, "echo b"), code(3, "echo c"), code(4, "echo d")];
        let ctx = AnalysisContext::new();
        assert!(DuplicatedBlock.check(&lines, &ctx).is_empty());
    }
}
