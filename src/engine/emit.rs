//! Component C9: dedupes and orders the final diagnostic list.

use crate::types::{Diagnostic, RuleSeverity};

fn display_rank_of(code: &str) -> u8 {
    crate::catalog::by_code(code)
        .map(|r| r.severity.display_rank())
        .unwrap_or(RuleSeverity::Style.display_rank())
}

/// Dedupes identical `(line_index, rule_code)` pairs, then sorts by
/// `(line_index ASC, severity display rank ASC, rule_code ASC)` — i.e. the
/// UI order `Error > Warning > Security > Performance > Style` (spec.md
/// §4.9), never the filter order used by [`super::gate`].
pub fn finalize(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by(|a, b| {
        a.line_number
            .cmp(&b.line_number)
            .then(a.rule_code.cmp(&b.rule_code))
    });
    diagnostics.dedup_by(|a, b| a.line_number == b.line_number && a.rule_code == b.rule_code);

    diagnostics.sort_by(|a, b| {
        a.line_number
            .cmp(&b.line_number)
            .then(display_rank_of(&a.rule_code).cmp(&display_rank_of(&b.rule_code)))
            .then(a.rule_code.cmp(&b.rule_code))
    });
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_line_and_code_pairs_collapse_to_one() {
        let diags = vec![Diagnostic::new(3, "E001"), Diagnostic::new(3, "E001")];
        assert_eq!(finalize(diags), vec![Diagnostic::new(3, "E001")]);
    }

    #[test]
    fn same_line_different_notes_still_dedupe_on_code_alone() {
        let diags = vec![
            Diagnostic::with_note(3, "E001", "first"),
            Diagnostic::with_note(3, "E001", "second"),
        ];
        assert_eq!(finalize(diags).len(), 1);
    }

    #[test]
    fn sorts_by_line_first() {
        let diags = vec![Diagnostic::new(2, "E001"), Diagnostic::new(1, "W001")];
        let out = finalize(diags);
        assert_eq!(out[0].line_number, 1);
        assert_eq!(out[1].line_number, 2);
    }

    #[test]
    fn same_line_sorts_by_ui_severity_rank_not_filter_rank() {
        // SEC001 (Security) and W001 (Warning) both on line 1: UI order
        // puts Warning before Security.
        let diags = vec![Diagnostic::new(1, "SEC001"), Diagnostic::new(1, "W001")];
        let out = finalize(diags);
        assert_eq!(out[0].rule_code, "W001");
        assert_eq!(out[1].rule_code, "SEC001");
    }

    #[test]
    fn same_line_same_severity_sorts_by_code() {
        let diags = vec![Diagnostic::new(1, "E002"), Diagnostic::new(1, "E001")];
        let out = finalize(diags);
        assert_eq!(out[0].rule_code, "E001");
        assert_eq!(out[1].rule_code, "E002");
    }
}
