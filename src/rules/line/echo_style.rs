use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::LineRule;
use crate::types::Diagnostic;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::LazyLock;

static ECHO_OFF: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*echo\s+off\s*$").unwrap());

/// S002: ECHO OFF without a leading `@`.
pub struct EchoOffPrefix;

impl LineRule for EchoOffPrefix {
    fn code(&self) -> &'static str {
        "S002"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if ECHO_OFF.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

static COMMAND_TOKEN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\s*(@)?([A-Za-z]+)\b").unwrap());

const TRACKED_COMMANDS: &[&str] = &[
    "echo", "if", "goto", "call", "set", "for", "exit", "setlocal", "endlocal",
];

/// S003: the same command name used with more than one casing style across
/// the file. Maintains an accumulator across lines, scoped to one script's
/// analysis (spec.md §5: single-threaded, sequential, fresh per file).
pub struct CommandCasing {
    seen: RefCell<HashMap<String, String>>,
}

impl CommandCasing {
    pub fn new() -> Self {
        Self {
            seen: RefCell::new(HashMap::new()),
        }
    }
}

impl LineRule for CommandCasing {
    fn code(&self) -> &'static str {
        "S003"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        let Some(caps) = COMMAND_TOKEN.captures(&line.text) else {
            return Vec::new();
        };
        let token = caps.get(2).unwrap().as_str();
        let key = token.to_ascii_lowercase();
        if !TRACKED_COMMANDS.contains(&key.as_str()) {
            return Vec::new();
        }
        let mut seen = self.seen.borrow_mut();
        match seen.get(&key) {
            Some(first_seen) if first_seen != token => {
                vec![Diagnostic::new(line.index, self.code())]
            }
            Some(_) => Vec::new(),
            None => {
                seen.insert(key, token.to_string());
                Vec::new()
            }
        }
    }
}

/// S004: trailing whitespace on an otherwise non-blank line.
pub struct TrailingWhitespace;

impl LineRule for TrailingWhitespace {
    fn code(&self) -> &'static str {
        "S004"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if line.text.is_empty() {
            return Vec::new();
        }
        let has_trailing = line.text.ends_with(' ') || line.text.ends_with('\t');
        if has_trailing && !line.text.trim().is_empty() {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

/// S011: line length exceeds the configured maximum.
pub struct LineLength {
    max_line_length: usize,
}

impl LineLength {
    pub fn new(max_line_length: usize) -> Self {
        Self { max_line_length }
    }
}

impl LineRule for LineLength {
    fn code(&self) -> &'static str {
        "S011"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if line.text.chars().count() > self.max_line_length {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}

static REDUNDANT_PARENS: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\s*\(\s*([^()&|<>]+?)\s*\)\s*$").unwrap());

/// S028: a parenthesized group around a single command with no branching.
pub struct RedundantParens;

impl LineRule for RedundantParens {
    fn code(&self) -> &'static str {
        "S028"
    }

    fn check(&self, line: &Line, _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        if !line.is_code() {
            return Vec::new();
        }
        if REDUNDANT_PARENS.is_match(&line.text) {
            vec![Diagnostic::new(line.index, self.code())]
        } else {
            Vec::new()
        }
    }
}
