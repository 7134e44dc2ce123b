//! Component C8 (configuration half): the options the core `lint()` entry
//! point accepts. The on-disk TOML shape external callers parse into this
//! lives in [`file`].

pub mod file;

use crate::types::RuleSeverity;
use std::collections::HashSet;

/// Options accepted by [`crate::engine::lint`]. `recursive` is carried here
/// only because spec.md's external interface groups it with the rest of the
/// configuration surface — the core engine never reads it; the discovery
/// layer does.
#[derive(Debug, Clone)]
pub struct LintOptions {
    pub max_line_length: usize,
    pub enabled_rules: Option<HashSet<String>>,
    pub disabled_rules: HashSet<String>,
    pub min_severity: Option<RuleSeverity>,
    pub follow_calls: bool,
    pub recursive: bool,
    pub max_input_bytes: u64,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            max_line_length: 100,
            enabled_rules: None,
            disabled_rules: HashSet::new(),
            min_severity: None,
            follow_calls: false,
            recursive: true,
            max_input_bytes: crate::source::DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let opts = LintOptions::default();
        assert_eq!(opts.max_line_length, 100);
        assert!(opts.enabled_rules.is_none());
        assert!(opts.disabled_rules.is_empty());
        assert!(opts.min_severity.is_none());
        assert!(!opts.follow_calls);
        assert!(opts.recursive);
        assert_eq!(opts.max_input_bytes, 10 * 1024 * 1024);
    }
}
