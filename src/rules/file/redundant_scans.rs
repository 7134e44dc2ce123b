//! P010/P013/P015: repeated work the script could have cached instead of
//! redoing — the same FINDSTR scan, the same directory enumeration, or an
//! ECHO OFF issued again after it already took effect.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::collections::HashMap;
use std::sync::LazyLock;

static FINDSTR_CALL: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)\bfindstr\b\s+(.+)$").unwrap());
static DIR_ENUM: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^\s*dir\s+(.+)$|(?i)^\s*for\s+/d\s+(?:%%?[A-Za-z]\s+in\s*\(\s*(.+?)\s*\))").unwrap()
});
static ECHO_OFF: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*@?echo\s+off\s*$").unwrap());

fn normalize(args: &str) -> String {
    args.trim().to_ascii_lowercase()
}

/// P010: the same FINDSTR invocation (identical arguments) run more than once.
pub struct RepeatedFindstrScan;

impl FileRule for RepeatedFindstrScan {
    fn code(&self) -> &'static str {
        "P010"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut diags = Vec::new();
        for line in lines.iter().filter(|l| l.is_code()) {
            let Some(caps) = FINDSTR_CALL.captures(&line.text) else { continue };
            let key = normalize(caps.get(1).unwrap().as_str());
            if seen.contains_key(&key) {
                diags.push(Diagnostic::new(line.index, self.code()));
            } else {
                seen.insert(key, line.index);
            }
        }
        diags
    }
}

/// P013: the same directory enumeration (`DIR` or `FOR /D`) repeated with no
/// change to the target in between.
pub struct RedundantDirectoryEnumeration;

impl FileRule for RedundantDirectoryEnumeration {
    fn code(&self) -> &'static str {
        "P013"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut diags = Vec::new();
        for line in lines.iter().filter(|l| l.is_code()) {
            let Some(caps) = DIR_ENUM.captures(&line.text) else { continue };
            let target = caps.get(1).or_else(|| caps.get(2)).unwrap().as_str();
            let key = normalize(target);
            if seen.contains_key(&key) {
                diags.push(Diagnostic::new(line.index, self.code()));
            } else {
                seen.insert(key, line.index);
            }
        }
        diags
    }
}

/// P015: `ECHO OFF`/`@ECHO OFF` issued again after command echoing was
/// already disabled earlier in the script.
pub struct RedundantEchoOff;

impl FileRule for RedundantEchoOff {
    fn code(&self) -> &'static str {
        "P015"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut already_off = false;
        let mut diags = Vec::new();
        for line in lines.iter().filter(|l| l.is_code()) {
            if ECHO_OFF.is_match(&line.text) {
                if already_off {
                    diags.push(Diagnostic::new(line.index, self.code()));
                } else {
                    already_off = true;
                }
            }
        }
        diags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{LineKind, Suppression};
    use std::collections::HashSet;

    fn code(index: usize, text: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            kind: LineKind::Code,
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn repeated_findstr_scan_flagged() {
        let lines = vec![
            code(1, "findstr /c:\"error\" log.txt"),
            code(2, "echo hi"),
            code(3, "findstr /c:\"error\" log.txt"),
        ];
        let ctx = AnalysisContext::new();
        assert_eq!(RepeatedFindstrScan.check(&lines, &ctx), vec![Diagnostic::new(3, "P010")]);
    }

    #[test]
    fn different_findstr_args_not_flagged() {
        let lines = vec![code(1, "findstr /c:\"error\" log.txt"), code(2, "findstr /c:\"warn\" log.txt")];
        let ctx = AnalysisContext::new();
        assert!(RepeatedFindstrScan.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn repeated_dir_enumeration_flagged() {
        let lines = vec![code(1, "dir C:\\temp"), code(2, "dir C:\\temp")];
        let ctx = AnalysisContext::new();
        assert_eq!(RedundantDirectoryEnumeration.check(&lines, &ctx), vec![Diagnostic::new(2, "P013")]);
    }

    #[test]
    fn second_echo_off_flagged() {
        let lines = vec![code(1, "@echo off"), code(2, "echo hi"), code(3, "echo off")];
        let ctx = AnalysisContext::new();
        assert_eq!(RedundantEchoOff.check(&lines, &ctx), vec![Diagnostic::new(3, "P015")]);
    }

    #[test]
    fn single_echo_off_not_flagged() {
        let lines = vec![code(1, "@echo off"), code(2, "echo hi")];
        let ctx = AnalysisContext::new();
        assert!(RedundantEchoOff.check(&lines, &ctx).is_empty());
    }
}
