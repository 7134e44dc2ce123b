//! E002/S010/S029: label definition/reference bookkeeping, entirely backed by
//! the bookkeeping [`AnalysisContext::build`] already performed.

use crate::classify::{Line, LineKind};
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;

/// E002: a GOTO/CALL targets a label that is never defined anywhere in the
/// file (`:eof` is always considered defined).
pub struct UndefinedLabelTarget;

impl FileRule for UndefinedLabelTarget {
    fn code(&self) -> &'static str {
        "E002"
    }

    fn check(&self, _lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags: Vec<Diagnostic> = ctx
            .labels_referenced
            .iter()
            .filter(|(name, _)| !ctx.label_defined(name))
            .map(|(_, line)| Diagnostic::new(*line, self.code()))
            .collect();
        diags.sort_by_key(|d| d.line_number);
        diags
    }
}

/// S010: a label is defined but never targeted by any GOTO or CALL.
pub struct UnreferencedLabel;

impl FileRule for UnreferencedLabel {
    fn code(&self) -> &'static str {
        "S010"
    }

    fn check(&self, lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for line in lines {
            let LineKind::Label(name) = &line.kind else { continue };
            let key = name.to_ascii_uppercase();
            let referenced = ctx.labels_referenced.iter().any(|(referenced_key, _)| *referenced_key == key);
            if !referenced {
                diags.push(Diagnostic::new(line.index, self.code()));
            }
        }
        diags
    }
}

/// W013: a label name is defined more than once; GOTO/CALL always resolve
/// to the first definition, so later ones are dead weight.
pub struct DuplicateLabelDefinition;

impl FileRule for DuplicateLabelDefinition {
    fn code(&self) -> &'static str {
        "W013"
    }

    fn check(&self, _lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        ctx.duplicate_labels
            .iter()
            .map(|(_, line)| Diagnostic::new(*line, self.code()))
            .collect()
    }
}

/// S029: a GOTO/CALL spells a label differently than its definition.
pub struct LabelCasingMismatch;

impl FileRule for LabelCasingMismatch {
    fn code(&self) -> &'static str {
        "S029"
    }

    fn check(&self, _lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        ctx.label_casing_mismatches
            .iter()
            .map(|(_, _, line)| Diagnostic::new(*line, self.code()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Suppression;
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

    fn label(index: usize, name: &str) -> Line {
        Line {
            index,
            text: format!(":{name}"),
            kind: LineKind::Label(name.to_string()),
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn goto_to_undefined_label_flagged() {
        let lines = vec![code(1, "goto missing")];
        let ctx = AnalysisContext::build(&lines);
        assert_eq!(UndefinedLabelTarget.check(&lines, &ctx), vec![Diagnostic::new(1, "E002")]);
    }

    #[test]
    fn goto_eof_never_flagged() {
        let lines = vec![code(1, "goto :eof")];
        let ctx = AnalysisContext::build(&lines);
        assert!(UndefinedLabelTarget.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn defined_and_referenced_label_not_flagged_unreferenced() {
        let lines = vec![label(1, "build"), code(2, "goto build")];
        let ctx = AnalysisContext::build(&lines);
        assert!(UnreferencedLabel.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn defined_but_never_referenced_label_flagged() {
        let lines = vec![label(1, "build"), code(2, "echo hi")];
        let ctx = AnalysisContext::build(&lines);
        assert_eq!(UnreferencedLabel.check(&lines, &ctx), vec![Diagnostic::new(1, "S010")]);
    }

    #[test]
    fn duplicate_label_definition_flagged() {
        let lines = vec![label(1, "build"), code(2, "echo hi"), label(3, "build")];
        let ctx = AnalysisContext::build(&lines);
        assert_eq!(DuplicateLabelDefinition.check(&lines, &ctx), vec![Diagnostic::new(3, "W013")]);
    }

    #[test]
    fn casing_mismatch_surfaces_through_file_rule() {
        let lines = vec![label(1, "Build"), code(2, "call :build")];
        let ctx = AnalysisContext::build(&lines);
        assert_eq!(LabelCasingMismatch.check(&lines, &ctx), vec![Diagnostic::new(2, "S029")]);
    }
}
