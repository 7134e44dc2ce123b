//! Mutable per-script analysis state shared by the per-line (C5) and
//! whole-file (C6) engines. Built once per script, consumed, then discarded.

use crate::classify::{Line, LineKind};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    UnreachableAfterExit,
    UnreachableAfterGoto,
}

#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub labels_defined: HashMap<String, usize>,
    pub duplicate_labels: Vec<(String, usize)>,
    pub labels_referenced: HashSet<(String, usize)>,
    pub variables_defined: HashMap<String, usize>,
    pub variables_referenced: HashSet<(String, usize)>,
    pub setlocal_stack: Vec<usize>,
    pub delayed_expansion_stack: Vec<bool>,
    pub reachability_map: HashMap<usize, Reachability>,
    pub call_targets: HashSet<String>,
    /// Every `(label casing as defined, label casing as referenced, line)`
    /// triple where a GOTO/CALL spells a label differently than its
    /// definition (spec.md labels are case-insensitive; S029 is cosmetic).
    pub label_casing_mismatches: Vec<(String, String, usize)>,
    /// Lowercased file extension of the script being analyzed, if known.
    /// Populated by the caller before C6 runs (component C6 rules have no
    /// direct access to the script's path); used by S007.
    pub file_extension: Option<String>,
    /// Dominant line-ending style detected across the whole script at load
    /// time. Populated by the caller the same way as `file_extension`
    /// (C6 rules never re-derive it from individual `original_ending`
    /// values); used by W018.
    pub line_ending_style: Option<crate::source::LineEndingStyle>,
    /// First-seen spelling of each label, keyed by its uppercased name.
    label_spellings: HashMap<String, String>,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a label definition, normalizing case-insensitively for
    /// lookups while keeping the first-seen spelling for diagnostics.
    pub fn define_label(&mut self, name: &str, line: usize) {
        let key = name.to_ascii_uppercase();
        if self.labels_defined.contains_key(&key) {
            self.duplicate_labels.push((name.to_string(), line));
        } else {
            self.labels_defined.insert(key.clone(), line);
            self.label_spellings.insert(key, name.to_string());
        }
    }

    pub fn label_defined(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case("EOF") || self.labels_defined.contains_key(&name.to_ascii_uppercase())
    }

    /// Records a variable definition only if it is not already defined,
    /// per spec.md §3: "a variable is considered defined only at or after
    /// its earliest defining line."
    pub fn define_variable(&mut self, name: &str, line: usize) {
        self.variables_defined.entry(name.to_ascii_uppercase()).or_insert(line);
    }

    pub fn variable_defined_at_or_before(&self, name: &str, line: usize) -> bool {
        self.variables_defined
            .get(&name.to_ascii_uppercase())
            .is_some_and(|&defined_at| defined_at <= line)
    }

    pub fn push_setlocal(&mut self, line: usize, delayed_expansion: bool) {
        self.setlocal_stack.push(line);
        let inherited = self.delayed_expansion_stack.last().copied().unwrap_or(false);
        self.delayed_expansion_stack.push(delayed_expansion || inherited);
    }

    /// Pops a SETLOCAL/ENDLOCAL pair. Returns `true` if the stack was already
    /// empty (an unmatched ENDLOCAL, clamped to zero per spec.md §3).
    pub fn pop_setlocal(&mut self) -> bool {
        if self.setlocal_stack.pop().is_none() {
            return true;
        }
        self.delayed_expansion_stack.pop();
        false
    }

    pub fn delayed_expansion_enabled(&self) -> bool {
        self.delayed_expansion_stack.last().copied().unwrap_or(false)
    }

    pub fn setlocal_depth(&self) -> usize {
        self.setlocal_stack.len()
    }
}

static GOTO_TARGET: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)\bgoto\s+:?([A-Za-z_][\w]*)").unwrap());
static CALL_LABEL_TARGET: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)\bcall\s+:([A-Za-z_][\w]*)").unwrap());
static SET_ASSIGN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"(?i)^\s*set\s+(/a\s+|/p\s+)?"?([A-Za-z_][\w]*)\s*[=]"#).unwrap()
});
static VAR_REF: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"%([A-Za-z_][\w]*)%|!([A-Za-z_][\w]*)!").unwrap());
static SETLOCAL_LINE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*setlocal\b(.*)$").unwrap());
static ENDLOCAL_LINE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*endlocal\b").unwrap());
static UNCONDITIONAL_GOTO: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*goto\b").unwrap());
static UNCONDITIONAL_EXIT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*exit\b").unwrap());

impl AnalysisContext {
    /// Builds the fully populated context for one script in a single
    /// sequential pass, per spec.md §5 (no cross-file state, no threading
    /// within a single file's analysis).
    pub fn build(lines: &[Line]) -> Self {
        let mut ctx = Self::new();

        for line in lines {
            if let LineKind::Label(name) = &line.kind {
                ctx.define_label(name, line.index);
            }
        }

        let mut depth: i64 = 0;
        let mut blocked: Option<Reachability> = None;

        for line in lines {
            if let LineKind::Label(_) = &line.kind {
                blocked = None;
            }

            if !line.is_code() {
                continue;
            }

            ctx.reachability_map.insert(
                line.index,
                blocked.unwrap_or(Reachability::Reachable),
            );

            if let Some(caps) = GOTO_TARGET.captures(&line.text) {
                let target = caps.get(1).unwrap().as_str();
                ctx.labels_referenced.insert((target.to_ascii_uppercase(), line.index));
                ctx.note_casing_mismatch(target, line.index);
            }
            if let Some(caps) = CALL_LABEL_TARGET.captures(&line.text) {
                let target = caps.get(1).unwrap().as_str();
                ctx.labels_referenced.insert((target.to_ascii_uppercase(), line.index));
                ctx.call_targets.insert(target.to_ascii_uppercase());
                ctx.note_casing_mismatch(target, line.index);
            }

            if let Some(caps) = SET_ASSIGN.captures(&line.text) {
                let name = caps.get(2).unwrap().as_str();
                ctx.define_variable(name, line.index);
            }
            for caps in VAR_REF.captures_iter(&line.text) {
                let name = caps.get(1).or_else(|| caps.get(2)).unwrap().as_str();
                ctx.variables_referenced.insert((name.to_ascii_uppercase(), line.index));
            }

            if let Some(caps) = SETLOCAL_LINE.captures(&line.text) {
                let rest = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let delayed = rest.to_ascii_uppercase().contains("ENABLEDELAYEDEXPANSION");
                ctx.push_setlocal(line.index, delayed);
            } else if ENDLOCAL_LINE.is_match(&line.text) {
                ctx.pop_setlocal();
            }

            let line_depth_before = depth;
            depth += paren_delta(&line.text);

            let is_unconditional =
                line_depth_before == 0 && (UNCONDITIONAL_GOTO.is_match(&line.text) || UNCONDITIONAL_EXIT.is_match(&line.text));
            if is_unconditional && blocked.is_none() {
                blocked = Some(if UNCONDITIONAL_EXIT.is_match(&line.text) {
                    Reachability::UnreachableAfterExit
                } else {
                    Reachability::UnreachableAfterGoto
                });
            }
        }

        ctx
    }

    fn note_casing_mismatch(&mut self, referenced_as: &str, line: usize) {
        if referenced_as.eq_ignore_ascii_case("EOF") {
            return;
        }
        let key = referenced_as.to_ascii_uppercase();
        if let Some(defined_as) = self.label_spellings.get(&key) {
            if defined_as != referenced_as {
                self.label_casing_mismatches
                    .push((defined_as.clone(), referenced_as.to_string(), line));
            }
        }
    }
}

/// Net paren depth change contributed by one line, ignoring quoted and
/// caret-escaped characters (shared shape with [`crate::lexical::parens`],
/// computed per-line here since callers need the running depth at each line
/// rather than only the file-wide total).
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
