use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The five families the rule catalog is divided into.
///
/// There are two orderings in play and they deliberately disagree, so this
/// type exposes both as explicit methods rather than a single `Ord` impl:
/// filtering (`--min-severity`) uses `Style < Performance < Security <
/// Warning < Error`, while the emitted report groups by `Error > Warning >
/// Security > Performance > Style`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Error,
    Warning,
    Security,
    Performance,
    Style,
}

impl RuleSeverity {
    /// Rank used for `min_severity` filtering: higher is more severe.
    pub fn filter_rank(self) -> u8 {
        match self {
            RuleSeverity::Style => 0,
            RuleSeverity::Performance => 1,
            RuleSeverity::Security => 2,
            RuleSeverity::Warning => 3,
            RuleSeverity::Error => 4,
        }
    }

    /// Rank used for report ordering: lower sorts first.
    pub fn display_rank(self) -> u8 {
        match self {
            RuleSeverity::Error => 0,
            RuleSeverity::Warning => 1,
            RuleSeverity::Security => 2,
            RuleSeverity::Performance => 3,
            RuleSeverity::Style => 4,
        }
    }
}

impl std::fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RuleSeverity::Error => "error",
            RuleSeverity::Warning => "warning",
            RuleSeverity::Security => "security",
            RuleSeverity::Performance => "performance",
            RuleSeverity::Style => "style",
        })
    }
}

/// A single entry of the static rule catalog (component C4). Immutable after
/// construction; never mutated during analysis.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub code: &'static str,
    pub severity: RuleSeverity,
    pub name: &'static str,
    pub explanation: &'static str,
    pub recommendation: &'static str,
}

/// A single finding tied to a line and a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line_number: usize,
    pub rule_code: String,
    pub context_note: Option<String>,
}

impl Diagnostic {
    pub fn new(line_number: usize, rule_code: impl Into<String>) -> Self {
        Self {
            line_number,
            rule_code: rule_code.into(),
            context_note: None,
        }
    }

    pub fn with_note(line_number: usize, rule_code: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            line_number,
            rule_code: rule_code.into(),
            context_note: Some(note.into()),
        }
    }
}

/// Failure returned by `lint()` instead of a diagnostic list; never produced
/// partway through a rule pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    FileNotFound(PathBuf),
    FileTooLarge { path: PathBuf, limit: u64, actual: u64 },
    DecodeFailure(PathBuf),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(p) => write!(f, "file not found: {}", p.display()),
            LoadError::FileTooLarge { path, limit, actual } => write!(
                f,
                "{} is {actual} bytes, exceeding the {limit} byte limit",
                path.display()
            ),
            LoadError::DecodeFailure(p) => write!(f, "could not decode {} as text", p.display()),
        }
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_and_display_rank_disagree_on_security_vs_warning() {
        // Filtering: Warning outranks Security. Display: Warning sorts before Security.
        assert!(RuleSeverity::Warning.filter_rank() > RuleSeverity::Security.filter_rank());
        assert!(RuleSeverity::Warning.display_rank() < RuleSeverity::Security.display_rank());
    }

    #[test]
    fn error_is_always_highest_filter_rank() {
        for s in [
            RuleSeverity::Warning,
            RuleSeverity::Security,
            RuleSeverity::Performance,
            RuleSeverity::Style,
        ] {
            assert!(RuleSeverity::Error.filter_rank() > s.filter_rank());
        }
    }

    #[test]
    fn severity_display_text() {
        assert_eq!(RuleSeverity::Error.to_string(), "error");
        assert_eq!(RuleSeverity::Performance.to_string(), "performance");
    }
}
