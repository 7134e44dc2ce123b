//! W024/E034: commands that are either deprecated or outright removed from
//! supported Windows releases. Two separate lists per spec.md, and XCOPY
//! deliberately appears in neither (see `catalog::tests::xcopy_is_not_in_any_deprecated_or_removed_list`).

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

/// Still runs, but documented by Microsoft as deprecated.
const DEPRECATED_COMMANDS: &[&str] = &[
    "WMIC", "CACLS", "WINRM", "BITSADMIN", "NBTSTAT", "DPATH", "KEYS", "AT",
];

/// `NET SEND` is a two-word command; the single-word list above can't match it.
const DEPRECATED_PHRASES: &[&str] = &["NET SEND"];

/// Removed entirely from current Windows releases; running these fails.
const REMOVED_COMMANDS: &[&str] = &[
    "CASPOL", "DISKCOMP", "APPEND", "BROWSTAT", "INUSE", "DISKCOPY", "STREAMS",
];

const REMOVED_PHRASES: &[&str] = &["NET PRINT"];

static FIRST_WORD: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\s*(?:@)?([A-Za-z][\w.]*)\b").unwrap());

fn leading_command(text: &str) -> Option<String> {
    FIRST_WORD
        .captures(text)
        .map(|c| c.get(1).unwrap().as_str().to_ascii_uppercase())
}

fn matches_phrase(text: &str, phrase: &str) -> bool {
    let upper = text.to_ascii_uppercase();
    // Word-boundary match on a two-token phrase, not a bare substring.
    upper
        .split_whitespace()
        .collect::<Vec<_>>()
        .windows(2)
        .any(|w| w.join(" ") == phrase)
}

/// W024: a command that still runs but is deprecated.
pub struct DeprecatedCommand;

impl LineRule for DeprecatedCommand {
    fn code(&self) -> &'static str {
        "W024"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if let Some(cmd) = leading_command(&line.text) {
            if DEPRECATED_COMMANDS.contains(&cmd.as_str()) {
                return vec![Diagnostic::new(line.index, self.code())];
            }
        }
        if DEPRECATED_PHRASES.iter().any(|p| matches_phrase(&line.text, p)) {
            return vec![Diagnostic::new(line.index, self.code())];
        }
        Vec::new()
    }
}

/// E034: a command removed from supported Windows releases.
pub struct RemovedCommand;

impl LineRule for RemovedCommand {
    fn code(&self) -> &'static str {
        "E034"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if let Some(cmd) = leading_command(&line.text) {
            if REMOVED_COMMANDS.contains(&cmd.as_str()) {
                return vec![Diagnostic::new(line.index, self.code())];
            }
        }
        if REMOVED_PHRASES.iter().any(|p| matches_phrase(&line.text, p)) {
            return vec![Diagnostic::new(line.index, self.code())];
        }
        Vec::new()
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
    fn wmic_flagged_deprecated() {
        let ctx = AnalysisContext::new();
        let diags = DeprecatedCommand.check(&code_line("wmic os get caption"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn net_send_flagged_deprecated() {
        let ctx = AnalysisContext::new();
        let diags = DeprecatedCommand.check(&code_line("net send * hello"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn xcopy_not_flagged_deprecated_or_removed() {
        let ctx = AnalysisContext::new();
        assert!(DeprecatedCommand.check(&code_line("xcopy a b /s"), &ctx).is_empty());
        assert!(RemovedCommand.check(&code_line("xcopy a b /s"), &ctx).is_empty());
    }

    #[test]
    fn caspol_flagged_removed() {
        let ctx = AnalysisContext::new();
        let diags = RemovedCommand.check(&code_line("caspol -m -ag 1"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn net_print_flagged_removed() {
        let ctx = AnalysisContext::new();
        let diags = RemovedCommand.check(&code_line("net print \\\\server\\printer"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn unrelated_command_not_flagged() {
        let ctx = AnalysisContext::new();
        assert!(DeprecatedCommand.check(&code_line("echo hi"), &ctx).is_empty());
        assert!(RemovedCommand.check(&code_line("echo hi"), &ctx).is_empty());
    }
}
