//! S025: commented-out code left in the script.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

/// Leading tokens that read as an executed command rather than prose, once
/// the comment marker itself is stripped.
static LOOKS_LIKE_COMMAND: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"(?i)^\s*(echo|set|if|for|goto|call|exit|cd|copy|del|move|md|rd|start|pushd|popd)\b.*[=%]",
    )
    .unwrap()
});

fn stripped_comment_text(line: &Line) -> Option<&str> {
    if !line.is_comment() {
        return None;
    }
    let trimmed = line.text.trim_start();
    if let Some(rest) = trimmed.strip_prefix("::") {
        return Some(rest);
    }
    trimmed
        .strip_prefix("rem")
        .or_else(|| trimmed.strip_prefix("REM"))
        .or_else(|| trimmed.strip_prefix("Rem"))
}

/// S025: a `REM`/`::` line whose content parses as a command rather than prose.
pub struct CommentedOutCode;

impl LineRule for CommentedOutCode {
    fn code(&self) -> &'static str {
        "S025"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let Some(rest) = stripped_comment_text(line) else {
            return Vec::new();
        };
        if LOOKS_LIKE_COMMAND.is_match(rest) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{CommentMarker, LineKind, Suppression};
    use std::collections::HashSet;

    fn comment_line(text: &str) -> Line {
        Line {
            index: 1,
            text: text.to_string(),
            kind: LineKind::Comment(CommentMarker::Rem),
            suppressions: Suppression {
                codes: HashSet::new(),
                suppress_all: false,
            },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn commented_set_flagged() {
        let ctx = AnalysisContext::new();
        let diags = CommentedOutCode.check(&comment_line("REM set x=1"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn prose_comment_not_flagged() {
        let ctx = AnalysisContext::new();
        let diags = CommentedOutCode.check(&comment_line("REM this script builds the project"), &ctx);
        assert!(diags.is_empty());
    }
}
