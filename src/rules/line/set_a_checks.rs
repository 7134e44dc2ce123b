//! E021/E022/E023/E029: wires [`crate::lexical::set_a`] into the per-line
//! engine for `SET /A` expressions.

use crate::classify::Line;
use crate::lexical::set_a::{self, SetAError};
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

static SET_A: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"(?i)^\s*set\s+/a\s+"?([^"\r\n]*)"?\s*$"#).unwrap());

fn error_code(err: SetAError) -> &'static str {
    match err {
        SetAError::UnbalancedParens => "E021",
        SetAError::SyntaxError => "E022",
        SetAError::UnescapedSpecialChar => "E023",
        SetAError::TooComplex => "E029",
    }
}

/// Validates the arithmetic expression following `SET /A`, reporting
/// whichever of E021/E022/E023/E029 applies.
pub struct SetAChecks;

impl LineRule for SetAChecks {
    fn code(&self) -> &'static str {
        "E022"
    }

    fn codes(&self) -> Vec<&'static str> {
        vec!["E021", "E022", "E023", "E029"]
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        let Some(caps) = SET_A.captures(&line.text) else {
            return Vec::new();
        };
        let expr = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if expr.trim().is_empty() {
            return Vec::new();
        }
        match set_a::validate(expr) {
            Ok(()) => Vec::new(),
            Err(e) => vec![Diagnostic::new(line.index, error_code(e))],
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
    fn valid_set_a_not_flagged() {
        let ctx = AnalysisContext::new();
        assert!(SetAChecks.check(&code_line("set /a x=1+2"), &ctx).is_empty());
    }

    #[test]
    fn unbalanced_parens_flagged_e021() {
        let ctx = AnalysisContext::new();
        let diags = SetAChecks.check(&code_line("set /a x=(1+2"), &ctx);
        assert_eq!(diags, vec![Diagnostic::new(1, "E021")]);
    }

    #[test]
    fn bare_caret_flagged_e023() {
        let ctx = AnalysisContext::new();
        let diags = SetAChecks.check(&code_line("set /a x=1^2"), &ctx);
        assert_eq!(diags, vec![Diagnostic::new(1, "E023")]);
    }

    #[test]
    fn chained_assignment_flagged_e029() {
        let ctx = AnalysisContext::new();
        let diags = SetAChecks.check(&code_line("set /a x=y=1"), &ctx);
        assert_eq!(diags, vec![Diagnostic::new(1, "E029")]);
    }

    #[test]
    fn quoted_expression_with_special_chars_not_flagged() {
        let ctx = AnalysisContext::new();
        assert!(SetAChecks.check(&code_line("set /a \"x=1^2\""), &ctx).is_empty());
    }

    #[test]
    fn non_set_a_line_ignored() {
        let ctx = AnalysisContext::new();
        assert!(SetAChecks.check(&code_line("set x=1"), &ctx).is_empty());
    }
}
