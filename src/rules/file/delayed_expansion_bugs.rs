//! W014/W034: variables read with the stale, pre-block value because delayed
//! expansion was never turned on. W034 covers the multi-line parenthesized
//! block case; W014 covers the narrower single-line case where `SET` and the
//! read are chained with `&` — cmd.exe expands every `%VAR%` on a line
//! before running any command on it, so a same-line read still sees the
//! value from before that `SET` ran.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::collections::HashSet;
use std::sync::LazyLock;

static SET_NAME: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"(?i)^\s*set\s+"?([A-Za-z_][\w]*)\s*="#).unwrap());
static PERCENT_REF: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"%([A-Za-z_][\w]*)%").unwrap());
static SETLOCAL_DELAYED: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*setlocal\b.*enabledelayedexpansion").unwrap());
static ENDLOCAL_LINE: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*endlocal\b").unwrap());

fn paren_delta(text: &str) -> i64 {
    let mut delta = 0i64;
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '^' if !in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => delta += 1,
            ')' if !in_quotes => delta -= 1,
            _ => {}
        }
    }
    delta
}

pub struct StaleVariableInIfBlock;

impl FileRule for StaleVariableInIfBlock {
    fn code(&self) -> &'static str {
        "W034"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        let mut depth: i64 = 0;
        let mut delayed = false;
        let mut block_stack: Vec<HashSet<String>> = Vec::new();

        for line in lines {
            if !line.is_code() {
                continue;
            }
            if SETLOCAL_DELAYED.is_match(&line.text) {
                delayed = true;
            } else if ENDLOCAL_LINE.is_match(&line.text) {
                delayed = false;
            }

            let depth_before = depth;
            depth += paren_delta(&line.text);

            if depth > depth_before {
                for _ in depth_before..depth {
                    block_stack.push(HashSet::new());
                }
            }

            if !delayed {
                if let Some(top) = block_stack.last_mut() {
                    if let Some(caps) = SET_NAME.captures(&line.text) {
                        top.insert(caps.get(1).unwrap().as_str().to_ascii_uppercase());
                    }
                    for caps in PERCENT_REF.captures_iter(&line.text) {
                        let name = caps.get(1).unwrap().as_str().to_ascii_uppercase();
                        if top.contains(&name) {
                            diags.push(Diagnostic::new(line.index, "W034"));
                        }
                    }
                }
            }

            if depth < depth_before {
                for _ in depth..depth_before {
                    block_stack.pop();
                }
            }
        }

        diags
    }
}

static CHAINED_SET_THEN_READ: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"(?i)^\s*set\s+"?([A-Za-z_][\w]*)\s*=[^&\r\n]*&[^\r\n]*%([A-Za-z_][\w]*)%"#).unwrap()
});

/// W014: `SET NAME=value & ... %NAME% ...` on one line, outside delayed
/// expansion — the trailing `%NAME%` still expands to the value `NAME` had
/// before this `SET` ran, since the whole line is substituted up front.
pub struct ChainedSetThenStaleRead;

impl FileRule for ChainedSetThenStaleRead {
    fn code(&self) -> &'static str {
        "W014"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut delayed = false;
        let mut diags = Vec::new();
        for line in lines.iter().filter(|l| l.is_code()) {
            if SETLOCAL_DELAYED.is_match(&line.text) {
                delayed = true;
            } else if ENDLOCAL_LINE.is_match(&line.text) {
                delayed = false;
            }
            if delayed {
                continue;
            }
            if let Some(caps) = CHAINED_SET_THEN_READ.captures(&line.text) {
                let set_name = caps.get(1).unwrap().as_str();
                let read_name = caps.get(2).unwrap().as_str();
                if set_name.eq_ignore_ascii_case(read_name) {
                    diags.push(Diagnostic::new(line.index, self.code()));
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
    use std::collections::HashSet as StdHashSet;

    fn code(index: usize, text: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            kind: LineKind::Code,
            suppressions: Suppression { codes: StdHashSet::new(), suppress_all: false },
            original_ending: crate::source::LineEnding::Crlf,
        }
    }

    #[test]
    fn stale_read_inside_if_block_flagged() {
        let lines = vec![
            code(1, r#"if "%x%"=="1" ("#),
            code(2, "set y=2"),
            code(3, "echo %y%"),
            code(4, ")"),
        ];
        let ctx = AnalysisContext::new();
        assert_eq!(StaleVariableInIfBlock.check(&lines, &ctx), vec![Diagnostic::new(3, "W034")]);
    }

    #[test]
    fn delayed_expansion_read_inside_block_not_flagged() {
        let lines = vec![
            code(1, "setlocal enabledelayedexpansion"),
            code(2, r#"if "%x%"=="1" ("#),
            code(3, "set y=2"),
            code(4, "echo !y!"),
            code(5, ")"),
        ];
        let ctx = AnalysisContext::new();
        assert!(StaleVariableInIfBlock.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn read_outside_any_block_not_flagged() {
        let lines = vec![code(1, "set y=2"), code(2, "echo %y%")];
        let ctx = AnalysisContext::new();
        assert!(StaleVariableInIfBlock.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn chained_set_then_read_flagged() {
        let lines = vec![code(1, "set y=2 & echo %y%")];
        let ctx = AnalysisContext::new();
        assert_eq!(ChainedSetThenStaleRead.check(&lines, &ctx), vec![Diagnostic::new(1, "W014")]);
    }

    #[test]
    fn chained_set_then_read_with_delayed_expansion_not_flagged() {
        let lines = vec![code(1, "setlocal enabledelayedexpansion"), code(2, "set y=2 & echo %y%")];
        let ctx = AnalysisContext::new();
        assert!(ChainedSetThenStaleRead.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn chained_set_of_different_variable_not_flagged() {
        let lines = vec![code(1, "set y=2 & echo %x%")];
        let ctx = AnalysisContext::new();
        assert!(ChainedSetThenStaleRead.check(&lines, &ctx).is_empty());
    }
}
