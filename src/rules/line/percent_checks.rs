use crate::classify::Line;
use crate::lexical::{for_var, percent_tilde};
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

static PERCENT_TILDE_TOKEN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"%~[A-Za-z$:_]*(?:&\w+|\d)?").unwrap());

/// E017/E019/E024: percent-tilde expansions, via [`crate::lexical::percent_tilde`].
pub struct PercentTildeChecks;

impl LineRule for PercentTildeChecks {
    fn code(&self) -> &'static str {
        "E017"
    }

    fn codes(&self) -> Vec<&'static str> {
        vec!["E017", "E019", "E024"]
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        let mut diagnostics = Vec::new();
        for m in PERCENT_TILDE_TOKEN.find_iter(&line.text) {
            let token = &m.as_str()[1..]; // drop leading '%', keep '~...'
            match percent_tilde::parse(token) {
                Ok(_) => {}
                Err(percent_tilde::PercentTildeError::UnknownModifier) => {
                    diagnostics.push(Diagnostic::new(line.index, "E017"));
                }
                Err(percent_tilde::PercentTildeError::InvalidTarget) => {
                    diagnostics.push(Diagnostic::new(line.index, "E019"));
                }
                Err(percent_tilde::PercentTildeError::InvalidCombination) => {
                    diagnostics.push(Diagnostic::new(line.index, "E024"));
                }
            }
        }
        diagnostics
    }
}

static FOR_DECLARATION: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*for\s+(/[a-z]\s+\S+\s+)*(%%?[A-Za-z])\s+in\s*\(").unwrap());

/// E020: a FOR loop variable declared in the wrong form for a batch file.
pub struct ForVariableForm;

impl LineRule for ForVariableForm {
    fn code(&self) -> &'static str {
        "E020"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        let Some(caps) = FOR_DECLARATION.captures(&line.text) else {
            return Vec::new();
        };
        let token = caps.get(2).unwrap().as_str();
        if for_var::validate(token, true) {
            Vec::new()
        } else {
            vec![Diagnostic::new(line.index, self.code())]
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
            index: 2,
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
    fn valid_percent_tilde_not_flagged() {
        let ctx = AnalysisContext::new();
        let diags = PercentTildeChecks.check(&code_line("echo %~dpnx1"), &ctx);
        assert!(diags.is_empty());
    }

    #[test]
    fn unknown_modifier_flagged_as_e017() {
        let ctx = AnalysisContext::new();
        let diags = PercentTildeChecks.check(&code_line("echo %~q1"), &ctx);
        assert_eq!(diags, vec![Diagnostic::new(2, "E017")]);
    }

    #[test]
    fn single_percent_for_variable_flagged() {
        let ctx = AnalysisContext::new();
        let diags = ForVariableForm.check(&code_line("for %i in (*.txt) do echo %i"), &ctx);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule_code, "E020");
    }

    #[test]
    fn double_percent_for_variable_not_flagged() {
        let ctx = AnalysisContext::new();
        let diags = ForVariableForm.check(&code_line("for %%i in (*.txt) do echo %%i"), &ctx);
        assert!(diags.is_empty());
    }
}
