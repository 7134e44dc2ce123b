use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

static IF_NO_SPACE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*if(exist|not|defined|errorlevel|\[)").unwrap());

/// E003: `IF` not separated from its condition by whitespace.
pub struct IfKeywordSpacing;

impl LineRule for IfKeywordSpacing {
    fn code(&self) -> &'static str {
        "E003"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if line.is_code() && IF_NO_SPACE.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

static IF_EXIST_AND_EQ: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*if\s+(not\s+)?exist\s+.*==").unwrap());

/// E004: `IF EXIST` combined with `==` on the same clause.
pub struct IfExistMixedWithComparison;

impl LineRule for IfExistMixedWithComparison {
    fn code(&self) -> &'static str {
        "E004"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if line.is_code() && IF_EXIST_AND_EQ.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

static UNQUOTED_EMPTY_COMPARE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"(?i)if\s+(not\s+)?%[A-Za-z_][\w]*%==""#).unwrap());

/// E007: `IF %VAR%==""` instead of `IF "%VAR%"==""`.
pub struct UnquotedEmptyStringComparison;

impl LineRule for UnquotedEmptyStringComparison {
    fn code(&self) -> &'static str {
        "E007"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if line.is_code() && UNQUOTED_EMPTY_COMPARE.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

static UNQUOTED_COMPARE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"(?i)if\s+(not\s+)?(%[A-Za-z_][\w]*%|![A-Za-z_][\w]*!)==(""|[^"=])"#).unwrap()
});

/// W021: an `IF` string comparison with neither side quoted.
pub struct UnquotedIfComparison;

impl LineRule for UnquotedIfComparison {
    fn code(&self) -> &'static str {
        "W021"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if line.is_code() && UNQUOTED_COMPARE.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

static ERRORLEVEL_NO_OP: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)if\s+(not\s+)?errorlevel\s+\d+\s*(\(|goto|echo|call|exit|$)").unwrap());

/// E016: `IF [NOT] ERRORLEVEL <digits>` with no explicit comparison operator.
pub struct ErrorlevelWithoutOperator;

impl LineRule for ErrorlevelWithoutOperator {
    fn code(&self) -> &'static str {
        "E016"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if line.is_code() && ERRORLEVEL_NO_OP.is_match(line.text.trim_end()) {
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
    fn if_exist_without_space_flagged() {
        let ctx = AnalysisContext::new();
        assert_eq!(IfKeywordSpacing.check(&code_line("ifexist foo.txt echo hi"), &ctx).len(), 1);
    }

    #[test]
    fn if_with_space_not_flagged() {
        let ctx = AnalysisContext::new();
        assert!(IfKeywordSpacing.check(&code_line("if exist foo.txt echo hi"), &ctx).is_empty());
    }

    #[test]
    fn if_exist_mixed_with_eq_flagged() {
        let ctx = AnalysisContext::new();
        let diags = IfExistMixedWithComparison.check(&code_line("if exist foo.txt==bar echo hi"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn unquoted_empty_comparison_flagged() {
        let ctx = AnalysisContext::new();
        let diags = UnquotedEmptyStringComparison.check(&code_line(r#"if %VAR%=="" echo empty"#), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn quoted_comparison_not_flagged_by_w021() {
        let ctx = AnalysisContext::new();
        let diags = UnquotedIfComparison.check(&code_line(r#"if "%VAR%"=="x" echo hi"#), &ctx);
        assert!(diags.is_empty());
    }

    #[test]
    fn unquoted_comparison_flagged_by_w021() {
        let ctx = AnalysisContext::new();
        let diags = UnquotedIfComparison.check(&code_line("if %VAR%==x echo hi"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn unquoted_empty_string_comparison_also_flagged_by_w021() {
        let ctx = AnalysisContext::new();
        let diags = UnquotedIfComparison.check(&code_line(r#"if %VAR%=="" echo empty"#), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn errorlevel_without_operator_flagged() {
        let ctx = AnalysisContext::new();
        let diags = ErrorlevelWithoutOperator.check(&code_line("if errorlevel 1 goto fail"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn errorlevel_with_operator_not_flagged() {
        let ctx = AnalysisContext::new();
        let diags = ErrorlevelWithoutOperator.check(&code_line("if %errorlevel% equ 1 goto fail"), &ctx);
        assert!(diags.is_empty());
    }
}
