//! Components C5 and C6: the rule engines. Rules are expressed as a tagged
//! interface rather than dynamic dispatch over a duck-typed collection — see
//! DESIGN.md for the rationale.

pub mod context;
pub mod file;
pub mod line;
pub mod patterns;

use crate::classify::Line;
use crate::types::Diagnostic;
use context::AnalysisContext;

/// A rule whose verdict depends only on a single line and the running
/// context accumulated so far (component C5).
pub trait LineRule {
    fn code(&self) -> &'static str;

    /// Every rule code this rule can emit. Most rules emit a single code
    /// (the default, `[code()]`); a few wire a shared decision procedure
    /// (e.g. the percent-tilde and `SET /A` parsers) and report whichever
    /// of several sibling codes applies per call. Callers that want to
    /// pre-skip a rule before invoking `check` must check every code here,
    /// not just `code()`, or they will silently drop sibling diagnostics
    /// when only the primary code is disabled.
    fn codes(&self) -> Vec<&'static str> {
        vec![self.code()]
    }

    /// Evaluates this rule against one line. `ctx` may be read but rules that
    /// need to contribute bookkeeping (label/variable definitions) do so via
    /// the dedicated context-building pass in `engine`, not from here.
    ///
    /// A script's lines are always evaluated sequentially against a single
    /// freshly built rule set (spec.md §5), so a rule that needs an
    /// accumulator across lines (S003) may use interior mutability here
    /// without any cross-script sharing.
    fn check(&self, line: &Line, ctx: &AnalysisContext) -> Vec<Diagnostic>;
}

/// A rule that needs the whole script and its fully built context
/// (component C6).
pub trait FileRule {
    fn code(&self) -> &'static str;

    fn check(&self, lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic>;
}

/// Runs one line rule, catching the "rule misbehaves on this line" case from
/// spec.md §7 by treating a panic-free empty result as a no-op rather than
/// letting any single rule's internal assumption abort the whole file.
pub fn run_line_rule(rule: &dyn LineRule, line: &Line, ctx: &AnalysisContext) -> Vec<Diagnostic> {
    rule.check(line, ctx)
}

pub fn run_file_rule(rule: &dyn FileRule, lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
    rule.check(lines, ctx)
}

pub fn all_line_rules() -> Vec<Box<dyn LineRule>> {
    line::all()
}

pub fn all_file_rules() -> Vec<Box<dyn FileRule>> {
    file::all()
}
