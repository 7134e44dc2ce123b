//! E001: whole-file parenthesis balance, reusing the C3 lexical helper.

use crate::classify::Line;
use crate::lexical::parens;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;

pub struct UnbalancedParens;

impl FileRule for UnbalancedParens {
    fn code(&self) -> &'static str {
        "E001"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let report = parens::balance(lines);
        if let Some(line) = report.first_negative_line {
            return vec![Diagnostic::new(line, self.code())];
        }
        if report.final_depth != 0 {
            let last_code_line = lines.iter().rev().find(|l| l.is_code()).map(|l| l.index).unwrap_or(1);
            return vec![Diagnostic::new(last_code_line, self.code())];
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{LineKind, Suppression};
    use std::collections::HashSet;

    fn code_line(index: usize, text: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            kind: LineKind::Code,
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn balanced_file_not_flagged() {
        let lines = vec![code_line(1, "if (1==1) (echo yes)")];
        let ctx = AnalysisContext::new();
        assert!(UnbalancedParens.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn unclosed_paren_flagged_at_last_code_line() {
        let lines = vec![code_line(1, "if (1==1) ("), code_line(2, "echo yes")];
        let ctx = AnalysisContext::new();
        let diags = UnbalancedParens.check(&lines, &ctx);
        assert_eq!(diags, vec![Diagnostic::new(2, "E001")]);
    }

    #[test]
    fn stray_close_paren_flagged_at_its_own_line() {
        let lines = vec![code_line(1, "echo hi"), code_line(2, "echo )")];
        let ctx = AnalysisContext::new();
        let diags = UnbalancedParens.check(&lines, &ctx);
        assert_eq!(diags, vec![Diagnostic::new(2, "E001")]);
    }
}
