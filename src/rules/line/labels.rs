//! S017/S031: label-name style checks. Operate directly on `LineKind::Label`
//! rather than a regex over the raw text, since the label name is already
//! segmented out by component C2.

use crate::classify::{Line, LineKind};
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;

fn label_name(line: &Line) -> Option<&str> {
    match &line.kind {
        LineKind::Label(name) => Some(name.as_str()),
        _ => None,
    }
}

/// S017: a label name that is a single letter or purely numeric conveys
/// nothing about the block it introduces.
pub struct UndescriptiveLabelName;

impl LineRule for UndescriptiveLabelName {
    fn code(&self) -> &'static str {
        "S017"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let Some(name) = label_name(line) else {
            return Vec::new();
        };
        let bare = name.trim_end_matches(':');
        let undescriptive =
            bare.chars().count() <= 1 || bare.chars().all(|c| c.is_ascii_digit());
        if undescriptive {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

/// S031: `:name:` defines a label whose name literally includes the
/// trailing colon, rather than the bare name the author likely intended.
pub struct RedundantLabelColon;

impl LineRule for RedundantLabelColon {
    fn code(&self) -> &'static str {
        "S031"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let Some(name) = label_name(line) else {
            return Vec::new();
        };
        if name.ends_with(':') {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Suppression;
    use std::collections::HashSet;

    fn label_line(name: &str) -> Line {
        Line {
            index: 1,
            text: format!(":{name}"),
            kind: LineKind::Label(name.to_string()),
            suppressions: Suppression {
                codes: HashSet::new(),
                suppress_all: false,
            },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn single_letter_label_flagged() {
        let ctx = AnalysisContext::new();
        assert_eq!(UndescriptiveLabelName.check(&label_line("a"), &ctx).len(), 1);
    }

    #[test]
    fn numeric_label_flagged() {
        let ctx = AnalysisContext::new();
        assert_eq!(UndescriptiveLabelName.check(&label_line("123"), &ctx).len(), 1);
    }

    #[test]
    fn descriptive_label_not_flagged() {
        let ctx = AnalysisContext::new();
        assert!(UndescriptiveLabelName.check(&label_line("build_release"), &ctx).is_empty());
    }

    #[test]
    fn trailing_colon_flagged() {
        let ctx = AnalysisContext::new();
        let diags = RedundantLabelColon.check(&label_line("build:"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn plain_label_not_flagged_for_trailing_colon() {
        let ctx = AnalysisContext::new();
        assert!(RedundantLabelColon.check(&label_line("build"), &ctx).is_empty());
    }
}
