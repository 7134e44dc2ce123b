//! Data-driven line rules: a regex and a code, nothing else. Covers the
//! large family of single-line pattern-matched SEC/W/P/S codes that do not
//! need dedicated control-flow or expression-grammar logic.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use regex::Regex;

pub struct PatternSpec {
    pub code: &'static str,
    pub pattern: &'static str,
}

/// One compiled pattern, precompiled once at catalog construction per
/// spec.md §9 ("do not recompile per line").
pub struct PatternRule {
    code: &'static str,
    regex: Regex,
}

impl LineRule for PatternRule {
    fn code(&self) -> &'static str {
        self.code
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if self.regex.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code)]
        } else {
            Vec::new()
        }
    }
}

const SPECS: &[PatternSpec] = &[
    // Error family (pattern-matched subset)
    PatternSpec { code: "E005", pattern: r"(?i)(^|[\s>])(con|prn|aux|nul|com[1-9]|lpt[1-9])(\.[A-Za-z0-9]+)?\s*($|[<>])" },
    PatternSpec { code: "E031", pattern: r#""[^"\r\n]*\^[^"\r\n]*""# },

    // Security family
    PatternSpec { code: "SEC001", pattern: r"(?i)\b(set\s+\"?(?:pass(?:word)?|pwd|secret|api[_-]?key|token)\w*=)(?!%)" },
    PatternSpec { code: "SEC002", pattern: r"(?i)(curl|wget|bitsadmin)\b[^|&\r\n]*\|\s*(cmd|powershell|sh)\b" },
    PatternSpec { code: "SEC003", pattern: r"(?i)\b(reg\s+add\s+.*\\uac|netsh\s+advfirewall\s+set\s+allprofiles\s+state\s+off|sc\s+(stop|config)\s+windefend)" },
    PatternSpec { code: "SEC004", pattern: r"(?i)\b(icacls|cacls)\b.*\b(everyone|users)\b.*\b(/grant|:f)\b" },
    PatternSpec { code: "SEC005", pattern: r"(?i)\b(cmd\s*/c|start\s+/b)\s+.*%[0-9*]" },
    PatternSpec { code: "SEC006", pattern: r"(?i)%temp%\\[a-z0-9_]{1,8}\.(tmp|bat|cmd)\b" },
    PatternSpec { code: "SEC007", pattern: r"(?i)-executionpolicy\s+bypass|-ep\s+bypass" },
    PatternSpec { code: "SEC011", pattern: r"(?i)\b(ftp|telnet)://[^@\s]+:[^@\s]+@" },
    PatternSpec { code: "SEC012", pattern: r"(?i)\breg\s+(add|delete)\s+.*(defender|firewallpolicy|policies\\microsoft\\windows)" },
    PatternSpec { code: "SEC013", pattern: r"(?i)\b(sc|net)\s+(stop|delete)\s+(windefend|mpssvc|wuauserv|sense)\b" },
    PatternSpec { code: "SEC014", pattern: r"(?i)schtasks\s+/create\b" },
    PatternSpec { code: "SEC015", pattern: r"(?i)reg\s+add\s+.*\\run(once)?\\?" },
    PatternSpec { code: "SEC016", pattern: r"(?i)certutil\s+-decode\b|-enc(odedcommand)?\s+[a-z0-9+/=]{20,}" },
    PatternSpec { code: "SEC017", pattern: r"(?i)>\s*%?windir%?\\system32\\" },
    PatternSpec { code: "SEC018", pattern: r"(?i)-skip(certificatecheck|ca check|revocation)|curl\s+.*(-k|--insecure)\b" },
    PatternSpec { code: "SEC019", pattern: r"(?i)\brunas\b(?!.*rem\s+why)" },
    PatternSpec { code: "SEC020", pattern: r"(?i)netsh\s+advfirewall\s+firewall\s+add\s+rule\b.*action\s*=\s*allow" },
    PatternSpec { code: "SEC021", pattern: r"(?i)wevtutil\s+cl\b" },
    PatternSpec { code: "SEC022", pattern: r"(?i)\b(vssadmin\s+delete\s+shadows|wbadmin\s+delete\s+catalog)\b" },
    PatternSpec { code: "SEC023", pattern: r"(?i)wmic\s+/node:\S+\s+process\s+call\s+create\b" },
    PatternSpec { code: "SEC024", pattern: r"(?i)\b(curl|wget|start)\b[^\r\n]*\bhttps?://(?:\d{1,3}\.){3}\d{1,3}\b" },
    PatternSpec { code: "SEC025", pattern: r"(?i)mklink\b.*%\w+%" },
    PatternSpec { code: "SEC026", pattern: r"(?i)\brunas\b[^\r\n]*%\w+%" },
    PatternSpec { code: "SEC027", pattern: r"(?i)\b(curl|wget|bitsadmin)\b[^\r\n]*http://[^\r\n]*\.(exe|msi|ps1)\b" },
    PatternSpec { code: "SEC028", pattern: r#"(?i)net\s+user\s+\S+\s+("")|net\s+user\s+\S+\s+password\b"# },
    PatternSpec { code: "SEC029", pattern: r"(?i)auditpol\s+/set\b.*success:no,?\s*failure:no" },
    PatternSpec { code: "SEC030", pattern: r"(?i)add-mppreference\s+-exclusionpath\b" },

    // Warning family (pattern-matched subset)
    PatternSpec { code: "W006", pattern: r"(?i)^\s*set\s+\"?path=(?!%path%)" },
    PatternSpec { code: "W007", pattern: r#"^[A-Za-z]:\\[^%\r\n"]*\\"# },
    PatternSpec { code: "W009", pattern: r"(?i)\b(del|rmdir|rd)\s+(/s\s+)?(/q\s+)?\*\.\*\s*$|\b(del|rmdir|rd)\s+(/s\s+)?(/q\s+)?\*\s*$" },
    PatternSpec { code: "W010", pattern: r#"(?i)>>?\s*%[A-Za-z_]\w*%[^"\s][^\r\n]*"# },
    PatternSpec { code: "W011", pattern: r"(?i)^\s*@?echo\s+[^|&\r\n]+\|\s*\S" },
    PatternSpec { code: "W016", pattern: r"(?i)^\s*title\s+\S" },
    PatternSpec { code: "W019", pattern: r#"(?i)^\s*set\s+"?[A-Za-z_]\w*\s*=\s*$"# },
    PatternSpec { code: "W020", pattern: r#"(?i)^\s*set\s+"?[A-Za-z_]\w*\s*=\s*[^"\s][^\r\n]*[&|<>^][^\r\n]*$"# },
    PatternSpec { code: "W025", pattern: r#"(?i)^\s*for\s+/f\b(?!.*usebackq).*\(\s*"[^"\r\n]+"\s*\)"# },
    PatternSpec { code: "W029", pattern: r"(?i)\bfor\s+/r\s+\(" },
    PatternSpec { code: "W030", pattern: r"(?i)\b(xcopy|robocopy)\b(?!.*/[Yy]\b)" },
    PatternSpec { code: "W031", pattern: r"(?i)net\s+use\s+\S+\s+\\\\(?!.*persistent)" },
    PatternSpec { code: "W033", pattern: r"(?i)\bif\s+(not\s+)?-?\d+\s*==\s*-?\d+\b" },
    PatternSpec { code: "W035", pattern: r"(?i)^\s*shutdown\b(?!.*/[ft])" },
    PatternSpec { code: "W036", pattern: r"(?i)taskkill\s+/im\s+\*" },
    PatternSpec { code: "W037", pattern: r"(?i)^\s*\S+\.(vbs|js)\b" },

    // Style family (pattern-matched subset)
    PatternSpec { code: "S006", pattern: "^\t" },
    PatternSpec { code: "S016", pattern: r"(?i)^\s*echo\.\s*$" },
    PatternSpec { code: "S019", pattern: r"(?i)^\s*(?:[A-Za-z]:\\|\\\\)[^\s]*\\(?:findstr|xcopy|robocopy|ping|net|reg|sc|tasklist|taskkill)(\.exe)?\b" },
    PatternSpec { code: "S021", pattern: r"(?i)^\s*pause\s*$" },
    PatternSpec { code: "S022", pattern: r"(?i)^\s*cls\s*$" },
    PatternSpec { code: "S024", pattern: r"(?i)\b(if|set\s*/a)\b[^\r\n]*[^\w.](?:[2-9]|[1-9]\d+)\b(?!\s*\))" },
    PatternSpec { code: "S027", pattern: r#"(?i)^\s*if\s+(not\s+)?"%[A-Za-z_]\w*%"\s*==\s*"(true|false|yes|no|1|0)"\s"# },

    // Performance family (pattern-matched subset)
    PatternSpec { code: "P007", pattern: r"(?i)^\s*for\s+/f\b[^\r\n]*\(\s*'?\s*type\s+\S" },
    PatternSpec { code: "P012", pattern: r"(?i)\bping\s+127\.0\.0\.1\s+-n\s+\d+" },
    PatternSpec { code: "P016", pattern: r"(?i)^\s*type\s+\S+\s*(>\s*nul|1>\s*nul)\s*$" },
    PatternSpec { code: "P021", pattern: r"(?i)\bxcopy\b.*\s/s\b" },
    PatternSpec { code: "P025", pattern: r"(?i)^\s*call\s+(?!:)[^\s.]+(\s|$)(?!.*\.(bat|cmd|exe|com)\b)" },
];

pub fn all() -> Vec<PatternRule> {
    SPECS
        .iter()
        .map(|spec| PatternRule {
            code: spec.code,
            regex: compile(spec.pattern),
        })
        .collect()
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
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
    fn all_patterns_compile() {
        let compiled: Vec<Regex> = SPECS.iter().map(|s| compile(s.pattern)).collect();
        assert_eq!(compiled.len(), SPECS.len());
    }

    #[test]
    fn every_spec_code_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for spec in SPECS {
            assert!(seen.insert(spec.code), "duplicate pattern code {}", spec.code);
        }
    }

    #[test]
    fn sec001_matches_plaintext_password_assignment() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "SEC001").unwrap();
        let ctx = AnalysisContext::new();
        let diags = rule.check(&code_line(r#"set password=hunter2"#), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn sec001_does_not_match_password_read_from_variable() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "SEC001").unwrap();
        let ctx = AnalysisContext::new();
        let diags = rule.check(&code_line("set password=%SECRET%"), &ctx);
        assert!(diags.is_empty());
    }

    #[test]
    fn w009_matches_broad_wildcard_delete() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "W009").unwrap();
        let ctx = AnalysisContext::new();
        let diags = rule.check(&code_line("del /s /q *.*"), &ctx);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn s021_matches_bare_pause() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "S021").unwrap();
        let ctx = AnalysisContext::new();
        assert_eq!(rule.check(&code_line("pause"), &ctx).len(), 1);
    }

    #[test]
    fn e005_matches_reserved_device_name() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "E005").unwrap();
        let ctx = AnalysisContext::new();
        assert_eq!(rule.check(&code_line("echo hi > con"), &ctx).len(), 1);
    }

    #[test]
    fn e031_matches_caret_inside_quotes() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "E031").unwrap();
        let ctx = AnalysisContext::new();
        assert_eq!(rule.check(&code_line(r#"echo "a^b""#), &ctx).len(), 1);
    }

    #[test]
    fn w019_matches_bare_set_with_no_value() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "W019").unwrap();
        let ctx = AnalysisContext::new();
        assert_eq!(rule.check(&code_line("set FOO="), &ctx).len(), 1);
    }

    #[test]
    fn w029_matches_for_r_without_root() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "W029").unwrap();
        let ctx = AnalysisContext::new();
        assert_eq!(rule.check(&code_line("for /r (%%f) do echo %%f"), &ctx).len(), 1);
    }

    #[test]
    fn p025_matches_call_to_external_exe_target() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "P025").unwrap();
        let ctx = AnalysisContext::new();
        assert_eq!(rule.check(&code_line("call notepad"), &ctx).len(), 1);
    }

    #[test]
    fn p025_does_not_match_call_to_label() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "P025").unwrap();
        let ctx = AnalysisContext::new();
        assert!(rule.check(&code_line("call :build"), &ctx).is_empty());
    }

    #[test]
    fn p007_matches_for_f_reading_via_type() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "P007").unwrap();
        let ctx = AnalysisContext::new();
        assert_eq!(rule.check(&code_line("for /f %%l in ('type big.log') do echo %%l"), &ctx).len(), 1);
    }

    #[test]
    fn p007_does_not_match_for_f_reading_file_directly() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "P007").unwrap();
        let ctx = AnalysisContext::new();
        assert!(rule.check(&code_line("for /f %%l in (big.log) do echo %%l"), &ctx).is_empty());
    }

    #[test]
    fn patterns_ignore_non_code_lines() {
        let rules = all();
        let rule = rules.iter().find(|r| r.code() == "S021").unwrap();
        let ctx = AnalysisContext::new();
        let mut comment = code_line("pause");
        comment.kind = LineKind::Comment(crate::classify::CommentMarker::Rem);
        assert!(rule.check(&comment, &ctx).is_empty());
    }
}
