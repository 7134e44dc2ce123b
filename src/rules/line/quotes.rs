use crate::classify::Line;
use crate::lexical::tokenizer;
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

/// E009: an odd number of double quotes on the line.
pub struct UnmatchedQuotes;

impl LineRule for UnmatchedQuotes {
    fn code(&self) -> &'static str {
        "E009"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        let (_, result) = tokenizer::tokenize(&line.text);
        if result.quote_count % 2 != 0 {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

static SPACE_CAPABLE_VAR: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)(?:^|[^\^\x22])%((?:\w*path\w*|\w*dir\w*|\w*file\w*|\w*name\w*))%(?!\x22)").unwrap()
});

/// W005: an unquoted `%VAR%` whose name suggests a path/file value that may
/// contain spaces.
pub struct UnquotedSpaceCapableVariable;

impl LineRule for UnquotedSpaceCapableVariable {
    fn code(&self) -> &'static str {
        "W005"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if SPACE_CAPABLE_VAR.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}
