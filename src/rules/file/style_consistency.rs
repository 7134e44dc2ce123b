//! S001, S005, S007, S008, S009, S013, S014, S020, S023, S026, S030, S032,
//! S033: file-wide style consistency checks that do not fit any single
//! control-flow family.

use crate::classify::{CommentMarker, Line, LineKind};
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::source::LineEnding;
use crate::types::Diagnostic;
use std::collections::HashMap;
use std::sync::LazyLock;

const HEADER_SCAN_WINDOW: usize = 3;

static ECHO_OFF: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*@echo\s+off\s*$").unwrap());

/// S001: no `@ECHO OFF` within the first few lines of the script.
pub struct MissingEchoOff;

impl FileRule for MissingEchoOff {
    fn code(&self) -> &'static str {
        "S001"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let found = lines
            .iter()
            .filter(|l| l.is_code())
            .take(HEADER_SCAN_WINDOW)
            .any(|l| ECHO_OFF.is_match(&l.text));
        if found {
            Vec::new()
        } else {
            vec![Diagnostic::new(1, self.code())]
        }
    }
}

/// S005: a line's original terminator differs from the file's dominant style.
pub struct InconsistentLineEnding;

impl FileRule for InconsistentLineEnding {
    fn code(&self) -> &'static str {
        "S005"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut counts: HashMap<LineEnding, usize> = HashMap::new();
        for line in lines {
            if line.original_ending != LineEnding::None {
                *counts.entry(line.original_ending).or_insert(0) += 1;
            }
        }
        let Some((&dominant, _)) = counts.iter().max_by_key(|(_, count)| **count) else {
            return Vec::new();
        };
        lines
            .iter()
            .filter(|l| l.original_ending != LineEnding::None && l.original_ending != dominant)
            .map(|l| Diagnostic::new(l.index, self.code()))
            .collect()
    }
}

/// S007: the script's own file extension is not lowercase `.bat`/`.cmd`.
pub struct UnconventionalExtensionCasing;

impl FileRule for UnconventionalExtensionCasing {
    fn code(&self) -> &'static str {
        "S007"
    }

    fn check(&self, _lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        match &ctx.file_extension {
            Some(ext) if ext != &ext.to_ascii_lowercase() => vec![Diagnostic::new(1, self.code())],
            _ => Vec::new(),
        }
    }
}

fn leading_width(text: &str) -> (usize, bool) {
    let mut spaces = 0usize;
    let mut has_tab = false;
    for ch in text.chars() {
        match ch {
            ' ' => spaces += 1,
            '\t' => {
                has_tab = true;
                spaces += 1;
            }
            _ => break,
        }
    }
    (spaces, has_tab)
}

/// S008: code lines are indented by inconsistent widths (ignoring tabs,
/// which S006 already covers separately).
pub struct InconsistentIndentation;

impl FileRule for InconsistentIndentation {
    fn code(&self) -> &'static str {
        "S008"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut unit: Option<usize> = None;
        let mut diags = Vec::new();
        for line in lines {
            if !line.is_code() {
                continue;
            }
            let (width, has_tab) = leading_width(&line.text);
            if width == 0 || has_tab {
                continue;
            }
            match unit {
                None => unit = Some(width),
                Some(u) if width % u != 0 => diags.push(Diagnostic::new(line.index, self.code())),
                Some(_) => {}
            }
        }
        diags
    }
}

/// S009: a label not preceded by a blank line (except when it opens the file).
pub struct LabelNotPrecededByBlankLine;

impl FileRule for LabelNotPrecededByBlankLine {
    fn code(&self) -> &'static str {
        "S009"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if !matches!(line.kind, LineKind::Label(_)) {
                continue;
            }
            if i == 0 {
                continue;
            }
            if !lines[i - 1].is_blank() {
                diags.push(Diagnostic::new(line.index, self.code()));
            }
        }
        diags
    }
}

/// S013: the script mixes `REM` and `::` comment markers.
pub struct MixedCommentStyle;

impl FileRule for MixedCommentStyle {
    fn code(&self) -> &'static str {
        "S013"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut first_style: Option<CommentMarker> = None;
        let mut diags = Vec::new();
        for line in lines {
            let LineKind::Comment(marker) = &line.kind else { continue };
            match &first_style {
                None => first_style = Some(marker.clone()),
                Some(style) if style != marker => diags.push(Diagnostic::new(line.index, self.code())),
                Some(_) => {}
            }
        }
        diags
    }
}

static SECTION_DIVIDER: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\s*(::|rem)\s*[-=]{3,}").unwrap());

/// S014: a section-divider comment (e.g. `:: ----`) not preceded by a blank line.
pub struct MissingSectionSeparator;

impl FileRule for MissingSectionSeparator {
    fn code(&self) -> &'static str {
        "S014"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if !line.is_comment() || !SECTION_DIVIDER.is_match(&line.text.to_ascii_lowercase()) {
                continue;
            }
            if i > 0 && !lines[i - 1].is_blank() {
                diags.push(Diagnostic::new(line.index, self.code()));
            }
        }
        diags
    }
}

static HELP_BANNER: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r#"["']?/\?["']?"#).unwrap());

/// S020: the `/?` help-banner check is sometimes quoted and sometimes not.
pub struct InconsistentHelpBannerUsage;

impl FileRule for InconsistentHelpBannerUsage {
    fn code(&self) -> &'static str {
        "S020"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut first_quoted: Option<bool> = None;
        let mut diags = Vec::new();
        for line in lines {
            if !line.is_code() {
                continue;
            }
            let Some(m) = HELP_BANNER.find(&line.text) else { continue };
            let quoted = m.as_str().starts_with('"') || m.as_str().starts_with('\'');
            match first_quoted {
                None => first_quoted = Some(quoted),
                Some(f) if f != quoted => diags.push(Diagnostic::new(line.index, self.code())),
                Some(_) => {}
            }
        }
        diags
    }
}

static SET_LITERAL: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"(?i)^\s*set\s+"?[A-Za-z_]\w*\s*=\s*(".*"|[^"\s][^\r\n]*)$"#).unwrap());

/// S023: `SET` assignments of string literals sometimes quoted and sometimes not.
pub struct InconsistentQuotingStyle;

impl FileRule for InconsistentQuotingStyle {
    fn code(&self) -> &'static str {
        "S023"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut first_quoted: Option<bool> = None;
        let mut diags = Vec::new();
        for line in lines {
            if !line.is_code() {
                continue;
            }
            let Some(caps) = SET_LITERAL.captures(&line.text) else { continue };
            let value = caps.get(1).unwrap().as_str();
            if value.contains('%') {
                continue;
            }
            let quoted = value.starts_with('"');
            match first_quoted {
                None => first_quoted = Some(quoted),
                Some(f) if f != quoted => diags.push(Diagnostic::new(line.index, self.code())),
                Some(_) => {}
            }
        }
        diags
    }
}

static EXIT_LINE: LazyLock<regex::Regex> = LazyLock::new(|| regex::Regex::new(r"(?i)^\s*exit\b(\s*/b\b)?").unwrap());

static SET_OPERATOR_SPACING: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*set\s+(/a\s+)?\"?[A-Za-z_]\w*(\s*)=").unwrap());

/// S018: `SET` assignments space the `=` differently across the file
/// (`x=1` next to `y = 2`).
pub struct InconsistentOperatorSpacing;

impl FileRule for InconsistentOperatorSpacing {
    fn code(&self) -> &'static str {
        "S018"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut first_spaced: Option<bool> = None;
        let mut diags = Vec::new();
        for line in lines {
            if !line.is_code() {
                continue;
            }
            let Some(caps) = SET_OPERATOR_SPACING.captures(&line.text) else { continue };
            let spaced = !caps.get(2).unwrap().as_str().is_empty();
            match first_spaced {
                None => first_spaced = Some(spaced),
                Some(f) if f != spaced => diags.push(Diagnostic::new(line.index, self.code())),
                Some(_) => {}
            }
        }
        diags
    }
}

/// S026: `EXIT` used both with and without `/B` across the file.
pub struct InconsistentExitBUsage;

impl FileRule for InconsistentExitBUsage {
    fn code(&self) -> &'static str {
        "S026"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut first_with_b: Option<bool> = None;
        let mut diags = Vec::new();
        for line in lines {
            if !line.is_code() {
                continue;
            }
            let Some(caps) = EXIT_LINE.captures(&line.text) else { continue };
            let with_b = caps.get(1).is_some();
            match first_with_b {
                None => first_with_b = Some(with_b),
                Some(f) if f != with_b => diags.push(Diagnostic::new(line.index, self.code())),
                Some(_) => {}
            }
        }
        diags
    }
}

/// S030: the script opens with no comment at all before its first command.
pub struct MissingHeaderComment;

impl FileRule for MissingHeaderComment {
    fn code(&self) -> &'static str {
        "S030"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let has_leading_comment = lines
            .iter()
            .take_while(|l| l.is_blank() || l.is_comment() || ECHO_OFF.is_match(&l.text))
            .any(|l| l.is_comment());
        if has_leading_comment {
            Vec::new()
        } else {
            vec![Diagnostic::new(1, self.code())]
        }
    }
}

const MAX_CONSECUTIVE_BLANK_LINES: usize = 2;

/// S032: more than a couple of consecutive blank lines.
pub struct ExcessiveBlankLines;

impl FileRule for ExcessiveBlankLines {
    fn code(&self) -> &'static str {
        "S032"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        let mut run_start: Option<usize> = None;
        let mut run_len = 0usize;
        for line in lines {
            if line.is_blank() {
                if run_start.is_none() {
                    run_start = Some(line.index);
                }
                run_len += 1;
            } else {
                if run_len > MAX_CONSECUTIVE_BLANK_LINES {
                    diags.push(Diagnostic::new(run_start.unwrap(), self.code()));
                }
                run_start = None;
                run_len = 0;
            }
        }
        if run_len > MAX_CONSECUTIVE_BLANK_LINES {
            diags.push(Diagnostic::new(run_start.unwrap(), self.code()));
        }
        diags
    }
}

/// S033: the file's last physical line has no trailing newline.
pub struct MissingTrailingNewline;

impl FileRule for MissingTrailingNewline {
    fn code(&self) -> &'static str {
        "S033"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        match lines.last() {
            Some(last) if last.original_ending == LineEnding::None => {
                vec![Diagnostic::new(last.index, self.code())]
            }
            _ => Vec::new(),
        }
    }
}

/// W018: the file's dominant line-ending style, as computed at load time
/// over the whole file, is `Mixed`. Distinct from S005 (a single line that
/// deviates from the dominant style): this fires once, file-wide, whenever
/// no single style actually dominates.
pub struct MixedLineEndings;

impl FileRule for MixedLineEndings {
    fn code(&self) -> &'static str {
        "W018"
    }

    fn check(&self, _lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        match ctx.line_ending_style {
            Some(crate::source::LineEndingStyle::Mixed) => vec![Diagnostic::new(1, self.code())],
            _ => Vec::new(),
        }
    }
}

static PATH_TOKEN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#""([A-Za-z]:\\[^"\r\n]*\s[^"\r\n]*)"|(?:^|\s)([A-Za-z]:\\\S*)"#).unwrap());

/// W028: the same path (one with a space, so quoting actually matters) seen
/// quoted in one invocation and bare in another.
pub struct InconsistentPathQuoting;

impl FileRule for InconsistentPathQuoting {
    fn code(&self) -> &'static str {
        "W028"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut quoted_prefixes: HashMap<String, usize> = HashMap::new();
        for line in lines.iter().filter(|l| l.is_code()) {
            for caps in PATH_TOKEN.captures_iter(&line.text) {
                if let Some(quoted) = caps.get(1) {
                    let prefix = quoted.as_str().split_whitespace().next().unwrap_or("");
                    quoted_prefixes.entry(prefix.to_ascii_lowercase()).or_insert(line.index);
                }
            }
        }
        if quoted_prefixes.is_empty() {
            return Vec::new();
        }

        let mut diags = Vec::new();
        for line in lines.iter().filter(|l| l.is_code()) {
            for caps in PATH_TOKEN.captures_iter(&line.text) {
                if let Some(bare) = caps.get(2) {
                    let key = bare.as_str().to_ascii_lowercase();
                    if quoted_prefixes.contains_key(&key) {
                        diags.push(Diagnostic::new(line.index, self.code()));
                    }
                }
            }
        }
        diags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Suppression;
    use std::collections::HashSet;

    fn code(index: usize, text: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            kind: LineKind::Code,
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: LineEnding::Crlf,
        }
    }

    fn blank(index: usize) -> Line {
        Line {
            index,
            text: String::new(),
            kind: LineKind::Blank,
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: LineEnding::Crlf,
        }
    }

    fn comment(index: usize, text: &str) -> Line {
        Line {
            index,
            text: text.to_string(),
            kind: LineKind::Comment(CommentMarker::Rem),
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: LineEnding::Crlf,
        }
    }

    fn label(index: usize, name: &str) -> Line {
        Line {
            index,
            text: format!(":{name}"),
            kind: LineKind::Label(name.to_string()),
            suppressions: Suppression { codes: HashSet::new(), suppress_all: false },
            original_ending: LineEnding::Crlf,
        }
    }

    #[test]
    fn missing_echo_off_flagged() {
        let lines = vec![code(1, "echo hi")];
        let ctx = AnalysisContext::new();
        assert_eq!(MissingEchoOff.check(&lines, &ctx), vec![Diagnostic::new(1, "S001")]);
    }

    #[test]
    fn echo_off_present_not_flagged() {
        let lines = vec![code(1, "@echo off"), code(2, "echo hi")];
        let ctx = AnalysisContext::new();
        assert!(MissingEchoOff.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn minority_line_ending_flagged() {
        let mut lines: Vec<Line> = (1..=4).map(|i| code(i, "echo hi")).collect();
        lines[3].original_ending = LineEnding::Lf;
        let ctx = AnalysisContext::new();
        assert_eq!(InconsistentLineEnding.check(&lines, &ctx), vec![Diagnostic::new(4, "S005")]);
    }

    #[test]
    fn label_without_preceding_blank_flagged() {
        let lines = vec![code(1, "echo hi"), label(2, "build")];
        let ctx = AnalysisContext::new();
        assert_eq!(LabelNotPrecededByBlankLine.check(&lines, &ctx), vec![Diagnostic::new(2, "S009")]);
    }

    #[test]
    fn label_at_start_of_file_not_flagged() {
        let lines = vec![label(1, "build")];
        let ctx = AnalysisContext::new();
        assert!(LabelNotPrecededByBlankLine.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn label_after_blank_not_flagged() {
        let lines = vec![code(1, "echo hi"), blank(2), label(3, "build")];
        let ctx = AnalysisContext::new();
        assert!(LabelNotPrecededByBlankLine.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn mixed_comment_style_flagged() {
        let lines = vec![comment(1, "REM a"), {
            let mut l = comment(2, ":: b");
            l.kind = LineKind::Comment(CommentMarker::DoubleColon);
            l
        }];
        let ctx = AnalysisContext::new();
        assert_eq!(MixedCommentStyle.check(&lines, &ctx), vec![Diagnostic::new(2, "S013")]);
    }

    #[test]
    fn exit_b_inconsistency_flagged() {
        let lines = vec![code(1, "exit /b 0"), code(2, "exit 1")];
        let ctx = AnalysisContext::new();
        assert_eq!(InconsistentExitBUsage.check(&lines, &ctx), vec![Diagnostic::new(2, "S026")]);
    }

    #[test]
    fn header_comment_present_not_flagged() {
        let lines = vec![comment(1, "REM builds the project"), code(2, "echo hi")];
        let ctx = AnalysisContext::new();
        assert!(MissingHeaderComment.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn missing_header_comment_flagged() {
        let lines = vec![code(1, "echo hi")];
        let ctx = AnalysisContext::new();
        assert_eq!(MissingHeaderComment.check(&lines, &ctx), vec![Diagnostic::new(1, "S030")]);
    }

    #[test]
    fn three_consecutive_blank_lines_flagged() {
        let lines = vec![code(1, "echo hi"), blank(2), blank(3), blank(4), code(5, "echo bye")];
        let ctx = AnalysisContext::new();
        assert_eq!(ExcessiveBlankLines.check(&lines, &ctx), vec![Diagnostic::new(2, "S032")]);
    }

    #[test]
    fn no_trailing_newline_flagged() {
        let mut lines = vec![code(1, "echo hi")];
        lines[0].original_ending = LineEnding::None;
        let ctx = AnalysisContext::new();
        assert_eq!(MissingTrailingNewline.check(&lines, &ctx), vec![Diagnostic::new(1, "S033")]);
    }

    #[test]
    fn mixed_line_ending_style_flagged() {
        let lines = vec![code(1, "echo hi")];
        let mut ctx = AnalysisContext::new();
        ctx.line_ending_style = Some(crate::source::LineEndingStyle::Mixed);
        assert_eq!(MixedLineEndings.check(&lines, &ctx), vec![Diagnostic::new(1, "W018")]);
    }

    #[test]
    fn uniform_line_ending_style_not_flagged() {
        let lines = vec![code(1, "echo hi")];
        let mut ctx = AnalysisContext::new();
        ctx.line_ending_style = Some(crate::source::LineEndingStyle::Crlf);
        assert!(MixedLineEndings.check(&lines, &ctx).is_empty());
    }

    #[test]
    fn path_quoted_then_bare_flagged() {
        let lines = vec![
            code(1, r#"copy "C:\Program Files\tool.exe" dest.exe"#),
            code(2, r#"dir C:\Program"#),
        ];
        let ctx = AnalysisContext::new();
        let diags = InconsistentPathQuoting.check(&lines, &ctx);
        assert_eq!(diags, vec![Diagnostic::new(2, "W028")]);
    }

    #[test]
    fn path_only_ever_quoted_not_flagged() {
        let lines = vec![code(1, r#"copy "C:\Program Files\tool.exe" dest.exe"#)];
        let ctx = AnalysisContext::new();
        assert!(InconsistentPathQuoting.check(&lines, &ctx).is_empty());
    }
}
