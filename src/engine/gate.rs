//! Component C8: the configuration and suppression gate. Takes every
//! candidate diagnostic a rule produced and decides whether it survives into
//! the final report.

use crate::catalog;
use crate::classify::Line;
use crate::config::LintOptions;
use crate::types::Diagnostic;

/// Returns `true` if `code` should be evaluated at all under `options`,
/// independent of any particular line's suppression state.
pub fn rule_enabled(options: &LintOptions, code: &str) -> bool {
    if options.disabled_rules.contains(code) {
        return false;
    }
    match &options.enabled_rules {
        Some(allowed) => allowed.contains(code),
        None => true,
    }
}

fn passes_min_severity(options: &LintOptions, code: &str) -> bool {
    let Some(min) = options.min_severity else { return true };
    match catalog::by_code(code) {
        Some(rule) => rule.severity.filter_rank() >= min.filter_rank(),
        None => true,
    }
}

/// Applies rule enable/disable, minimum severity, and per-line suppression
/// directives to one candidate diagnostic.
pub fn admit(options: &LintOptions, line: &Line, diagnostic: &Diagnostic) -> bool {
    rule_enabled(options, &diagnostic.rule_code)
        && passes_min_severity(options, &diagnostic.rule_code)
        && !line.is_suppressed(&diagnostic.rule_code)
}
