//! Component C4: the static rule registry. Every entry is data; no behavior
//! lives here. Decision procedures live in [`crate::rules`].

mod data;

use crate::types::{Rule, RuleSeverity};
use std::collections::HashMap;
use std::sync::LazyLock;

static BY_CODE: LazyLock<HashMap<&'static str, &'static Rule>> = LazyLock::new(|| {
    data::CATALOG.iter().map(|rule| (rule.code, rule)).collect()
});

/// Looks up a rule by its stable code (e.g. `"E001"`, `"SEC011"`).
pub fn by_code(code: &str) -> Option<&'static Rule> {
    BY_CODE.get(code).copied()
}

/// All catalog entries, in declaration order.
pub fn all() -> &'static [Rule] {
    &data::CATALOG
}

pub fn count_by_severity(severity: RuleSeverity) -> usize {
    data::CATALOG.iter().filter(|r| r.severity == severity).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for rule in all() {
            assert!(seen.insert(rule.code), "duplicate code {}", rule.code);
        }
    }

    #[test]
    fn lookup_finds_known_code() {
        assert!(by_code("E001").is_some());
        assert!(by_code("SEC011").is_some());
        assert!(by_code("P002").is_some());
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(by_code("Q999").is_none());
    }

    #[test]
    fn explain_and_recommendation_text_is_nonempty() {
        for rule in all() {
            assert!(!rule.explanation.is_empty(), "{} missing explanation", rule.code);
            assert!(!rule.recommendation.is_empty(), "{} missing recommendation", rule.code);
        }
    }

    #[test]
    fn xcopy_is_not_in_any_deprecated_or_removed_list() {
        // Spec calls this out explicitly: XCOPY must never be flagged by
        // W024 or E034 even though it shares a family with retired tools.
        for rule in all() {
            if rule.code == "W024" || rule.code == "E034" {
                assert!(!rule.explanation.to_uppercase().contains("XCOPY"));
            }
        }
    }
}
