//! Component C5: per-line rule engine. Each submodule groups rules that
//! share a decision procedure; `all()` assembles the full roster, including
//! the generic pattern-matched rules of [`crate::rules::patterns`].

mod chaining;
mod comments;
mod deprecated;
mod echo_style;
mod if_checks;
mod labels;
mod percent_checks;
mod quotes;
mod set_a_checks;

use crate::rules::patterns;
use crate::rules::LineRule;

pub fn all() -> Vec<Box<dyn LineRule>> {
    let mut rules: Vec<Box<dyn LineRule>> = vec![
        Box::new(echo_style::EchoOffPrefix),
        Box::new(echo_style::CommandCasing::new()),
        Box::new(echo_style::TrailingWhitespace),
        Box::new(echo_style::LineLength::new(100)),
        Box::new(echo_style::RedundantParens),
        Box::new(quotes::UnmatchedQuotes),
        Box::new(quotes::UnquotedSpaceCapableVariable),
        Box::new(if_checks::IfKeywordSpacing),
        Box::new(if_checks::IfExistMixedWithComparison),
        Box::new(if_checks::UnquotedEmptyStringComparison),
        Box::new(if_checks::UnquotedIfComparison),
        Box::new(if_checks::ErrorlevelWithoutOperator),
        Box::new(percent_checks::PercentTildeChecks),
        Box::new(percent_checks::ForVariableForm),
        Box::new(set_a_checks::SetAChecks),
        Box::new(deprecated::DeprecatedCommand),
        Box::new(deprecated::RemovedCommand),
        Box::new(labels::UndescriptiveLabelName),
        Box::new(labels::RedundantLabelColon),
        Box::new(comments::CommentedOutCode),
        Box::new(chaining::BareAmpersandChain),
        Box::new(chaining::DenseStatementChain),
    ];
    rules.extend(patterns::all().into_iter().map(|r| Box::new(r) as Box<dyn LineRule>));
    rules
}

pub fn with_max_line_length(max_line_length: usize) -> Vec<Box<dyn LineRule>> {
    let mut rules = all();
    for rule in rules.iter_mut() {
        if rule.code() == "S011" {
            *rule = Box::new(echo_style::LineLength::new(max_line_length));
        }
    }
    rules
}
