//! W004/W017: GOTO-based loop detection. P001/P009/P011/P014/P017/P020/P022:
//! constructs flagged inside a `FOR ... DO` loop body, approximated by a
//! single sequential scan of paren-depth-tracked loop frames (same shape as
//! the SETLOCAL/ENDLOCAL scan in [`crate::rules::file::setlocal`]).

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

static LABEL_DEF: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"^:([A-Za-z_]\w*)").unwrap());
static UNCONDITIONAL_GOTO: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*goto\s+:?([A-Za-z_]\w*)").unwrap());
static SET_ASSIGN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"(?i)^\s*set\s+(/a\s+)?"?([A-Za-z_]\w*)\s*[=]"#).unwrap());

/// W004: a label whose nearest subsequent unconditional `GOTO` back to it
/// has no SET assignment anywhere in between, so nothing in the loop body
/// can ever change the condition that would otherwise break out of it.
pub struct PotentialInfiniteLoop;

impl FileRule for PotentialInfiniteLoop {
    fn code(&self) -> &'static str {
        "W004"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let code_lines: Vec<&Line> = lines.iter().filter(|l| l.is_code() || LABEL_DEF.is_match(&l.text)).collect();
        let mut diags = Vec::new();

        for (i, line) in code_lines.iter().enumerate() {
            let Some(caps) = LABEL_DEF.captures(&line.text) else { continue };
            let label = caps.get(1).unwrap().as_str();

            let mut saw_set = false;
            for later in &code_lines[i + 1..] {
                if let Some(goto_caps) = UNCONDITIONAL_GOTO.captures(&later.text) {
                    if goto_caps.get(1).unwrap().as_str().eq_ignore_ascii_case(label) {
                        if !saw_set {
                            diags.push(Diagnostic::new(line.index, self.code()));
                        }
                        break;
                    }
                }
                if SET_ASSIGN.is_match(&later.text) {
                    saw_set = true;
                }
            }
        }
        diags
    }
}

/// W017: an unconditional `GOTO` whose target label is defined earlier in
/// the file — a hand-rolled loop where `FOR` would say the same thing more
/// directly.
pub struct GotoUsedForIteration;

impl FileRule for GotoUsedForIteration {
    fn code(&self) -> &'static str {
        "W017"
    }

    fn check(&self, lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        lines
            .iter()
            .filter(|l| l.is_code())
            .filter_map(|line| {
                let caps = UNCONDITIONAL_GOTO.captures(&line.text)?;
                let target = caps.get(1)?.as_str();
                let defined_at = ctx.labels_defined.get(&target.to_ascii_uppercase())?;
                (*defined_at < line.index).then(|| Diagnostic::new(line.index, self.code()))
            })
            .collect()
    }
}

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

static FOR_BLOCK_HEADER: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^\s*for\s+(?:/[a-z]\s+\S+\s+)*(%%?[A-Za-z])\s+in\s*\(([^)]*)\)\s*do\s*\(\s*$").unwrap()
});
static FOR_INLINE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^\s*for\s+(?:/[a-z]\s+\S+\s+)*(%%?[A-Za-z])\s+in\s*\(([^)]*)\)\s*do\s+(.+)$").unwrap()
});
static CALL_LABEL: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)\bcall\s+:\w+").unwrap());
static ECHO_CMD: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*echo\b").unwrap());
static FINDSTR_CMD: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)\bfindstr\b").unwrap());
static NETWORK_CMD: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)\b(ping|curl|wget|nslookup|tracert|net\s+use)\b").unwrap());
static EXTERNAL_PROC_CMD: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)\b(copy|xcopy|robocopy|reg|sc|tasklist|wmic|certutil|icacls|cacls|attrib|takeown)\b")
        .unwrap()
});

struct Frame {
    for_line: usize,
    loop_var: String,
    iterable: String,
    open_depth: i64,
    saw_external: bool,
    saw_call_label: bool,
    saw_constant_set: bool,
    saw_echo: bool,
    saw_findstr: bool,
    saw_network: bool,
}

#[derive(Default)]
struct ScanResult {
    p001: Vec<usize>,
    p009: Vec<usize>,
    p011: Vec<usize>,
    p014: Vec<usize>,
    p017: Vec<usize>,
    p020: Vec<usize>,
    p022: Vec<usize>,
}

fn references_var(text: &str, var: &str) -> bool {
    let needle = format!("%%{}", var.trim_start_matches('%').to_ascii_lowercase());
    text.to_ascii_lowercase().contains(&needle)
}

fn scan_for_loops(lines: &[Line]) -> ScanResult {
    let mut result = ScanResult::default();
    let mut stack: Vec<Frame> = Vec::new();
    let mut depth: i64 = 0;

    for line in lines {
        if !line.is_code() {
            continue;
        }

        if let Some(caps) = FOR_INLINE.captures(&line.text) {
            if !line.text.trim_end().ends_with('(') {
                let var = caps.get(1).unwrap().as_str().to_string();
                let iterable = caps.get(2).unwrap().as_str().trim().to_string();
                let body = caps.get(3).unwrap().as_str();
                evaluate_body(&mut result, line.index, &var, body);
                if let Some(parent) = stack.last() {
                    if iterable.eq_ignore_ascii_case(parent.iterable.trim()) {
                        result.p017.push(line.index);
                    }
                }
                continue;
            }
        }

        if let Some(caps) = FOR_BLOCK_HEADER.captures(&line.text) {
            let var = caps.get(1).unwrap().as_str().to_string();
            let iterable = caps.get(2).unwrap().as_str().trim().to_string();
            if let Some(parent) = stack.last() {
                if iterable.eq_ignore_ascii_case(parent.iterable.trim()) {
                    result.p017.push(line.index);
                }
            }
            depth += 1;
            stack.push(Frame {
                for_line: line.index,
                loop_var: var,
                iterable,
                open_depth: depth,
                saw_external: false,
                saw_call_label: false,
                saw_constant_set: false,
                saw_echo: false,
                saw_findstr: false,
                saw_network: false,
            });
            continue;
        }

        let depth_before = depth;
        depth += paren_delta(&line.text);

        if let Some(frame) = stack.last_mut() {
            evaluate_line(frame, &line.text);
        }

        if depth < depth_before {
            while let Some(frame) = stack.last() {
                if depth < frame.open_depth {
                    let frame = stack.pop().unwrap();
                    finalize(&mut result, &frame);
                } else {
                    break;
                }
            }
        }
    }

    for frame in &stack {
        finalize(&mut result, frame);
    }

    result
}

fn evaluate_line(frame: &mut Frame, text: &str) {
    if EXTERNAL_PROC_CMD.is_match(text) {
        frame.saw_external = true;
    }
    if CALL_LABEL.is_match(text) {
        frame.saw_call_label = true;
    }
    if FINDSTR_CMD.is_match(text) {
        frame.saw_findstr = true;
    }
    if NETWORK_CMD.is_match(text) {
        frame.saw_network = true;
    }
    if ECHO_CMD.is_match(text) {
        frame.saw_echo = true;
    }
    if let Some(caps) = SET_ASSIGN.captures(text) {
        let _ = caps;
        if !references_var(text, &frame.loop_var) {
            frame.saw_constant_set = true;
        }
    }
}

fn evaluate_body(result: &mut ScanResult, for_line: usize, var: &str, body: &str) {
    if EXTERNAL_PROC_CMD.is_match(body) {
        result.p001.push(for_line);
    }
    if CALL_LABEL.is_match(body) {
        result.p009.push(for_line);
    }
    if NETWORK_CMD.is_match(body) {
        result.p022.push(for_line);
    }
    if FINDSTR_CMD.is_match(body) {
        result.p020.push(for_line);
    }
    if ECHO_CMD.is_match(body) {
        result.p014.push(for_line);
    }
    if SET_ASSIGN.is_match(body) && !references_var(body, var) {
        result.p011.push(for_line);
    }
}

fn finalize(result: &mut ScanResult, frame: &Frame) {
    if frame.saw_external {
        result.p001.push(frame.for_line);
    }
    if frame.saw_call_label {
        result.p009.push(frame.for_line);
    }
    if frame.saw_constant_set {
        result.p011.push(frame.for_line);
    }
    if frame.saw_echo {
        result.p014.push(frame.for_line);
    }
    if frame.saw_findstr {
        result.p020.push(frame.for_line);
    }
    if frame.saw_network {
        result.p022.push(frame.for_line);
    }
}

macro_rules! loop_file_rule {
    ($name:ident, $code:literal, $field:ident) => {
        pub struct $name;

        impl FileRule for $name {
            fn code(&self) -> &'static str {
                $code
            }

            fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
                let mut lines_out = scan_for_loops(lines).$field;
                lines_out.sort_unstable();
                lines_out.dedup();
                lines_out.into_iter().map(|line| Diagnostic::new(line, $code)).collect()
            }
        }
    };
}

loop_file_rule!(ExternalProcessInLoop, "P001", p001);
loop_file_rule!(RedundantCallInLoop, "P009", p009);
loop_file_rule!(ConstantRecomputedInLoop, "P011", p011);
loop_file_rule!(EchoInLoop, "P014", p014);
loop_file_rule!(NestedLoopsOverSameSet, "P017", p017);
loop_file_rule!(FindstrInLoop, "P020", p020);
loop_file_rule!(NetworkCallInLoop, "P022", p022);
