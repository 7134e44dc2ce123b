//! The engine ties components C1–C9 together behind the single entry point
//! spec.md §6 describes: a pure function from `(path, options)` to
//! diagnostics, with no process-global mutable state beyond the read-only
//! rule catalog.

pub mod call_follower;
pub mod emit;
pub mod gate;

use crate::classify::{self, Line};
use crate::config::LintOptions;
use crate::rules::context::AnalysisContext;
use crate::rules::{self};
use crate::source;
use crate::types::{Diagnostic, LoadError};
use std::collections::HashSet;
use std::path::Path;

/// Runs every component over one script and returns its final, ordered,
/// gated diagnostic list.
pub fn lint(path: &Path, options: &LintOptions) -> Result<Vec<Diagnostic>, LoadError> {
    let script = source::load(path, options.max_input_bytes)?;
    let lines = classify::classify(&script);

    let mut ctx = AnalysisContext::build(&lines);
    ctx.file_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    ctx.line_ending_style = Some(script.line_ending_style);

    let mut raw_diags: Vec<(usize, Diagnostic)> = Vec::new();

    if options.follow_calls {
        let script_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut visited = HashSet::new();
        if let Ok(canonical) = path.canonicalize() {
            visited.insert(canonical);
        }
        let call_diags = call_follower::follow(script_dir, &lines, &mut ctx, &mut visited, options.max_input_bytes);
        for d in call_diags {
            let idx = d.line_number;
            raw_diags.push((idx, d));
        }
    }

    let line_rules = rules::line::with_max_line_length(options.max_line_length);
    for line in &lines {
        for rule in &line_rules {
            if rule.codes().iter().all(|code| !gate::rule_enabled(options, code)) {
                continue;
            }
            for d in rules::run_line_rule(rule.as_ref(), line, &ctx) {
                let idx = d.line_number;
                raw_diags.push((idx, d));
            }
        }
    }

    let file_rules = rules::all_file_rules();
    for rule in &file_rules {
        if !gate::rule_enabled(options, rule.code()) {
            continue;
        }
        for d in rules::run_file_rule(rule.as_ref(), &lines, &ctx) {
            let idx = d.line_number;
            raw_diags.push((idx, d));
        }
    }

    let gated: Vec<Diagnostic> = raw_diags
        .into_iter()
        .filter(|(idx, d)| {
            line_for(&lines, *idx)
                .map(|line| gate::admit(options, line, d))
                .unwrap_or(true)
        })
        .map(|(_, d)| d)
        .collect();

    Ok(emit::finalize(gated))
}

fn line_for(lines: &[Line], index: usize) -> Option<&Line> {
    lines.iter().find(|l| l.index == index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_script(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn lint_missing_file_returns_load_error() {
        let options = LintOptions::default();
        let err = lint(Path::new("/nonexistent/nope.bat"), &options).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn lint_reports_undefined_variable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "a.bat", "@echo off\r\necho %UNDEFINED%\r\n");
        let options = LintOptions::default();
        let diags = lint(&path, &options).unwrap();
        assert!(diags.iter().any(|d| d.rule_code == "E006"));
    }

    #[test]
    fn suppressed_line_drops_the_matching_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(
            dir.path(),
            "a.bat",
            "@echo off\r\nREM LINT:IGNORE-LINE E006\r\necho %UNDEFINED%\r\n",
        );
        let options = LintOptions::default();
        let diags = lint(&path, &options).unwrap();
        assert!(!diags.iter().any(|d| d.rule_code == "E006" && d.line_number == 3));
    }

    #[test]
    fn disabled_rule_never_appears() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "a.bat", "@echo off\r\necho %UNDEFINED%\r\n");
        let mut options = LintOptions::default();
        options.disabled_rules.insert("E006".to_string());
        let diags = lint(&path, &options).unwrap();
        assert!(!diags.iter().any(|d| d.rule_code == "E006"));
    }

    #[test]
    fn disabling_a_multi_code_rules_primary_code_does_not_drop_its_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "a.bat", "@echo off\r\nset /a x=y=1\r\n");
        let mut options = LintOptions::default();
        options.disabled_rules.insert("E022".to_string());
        let diags = lint(&path, &options).unwrap();
        assert!(!diags.iter().any(|d| d.rule_code == "E022"));
        assert!(diags.iter().any(|d| d.rule_code == "E029" && d.line_number == 2));
    }

    #[test]
    fn follow_calls_only_removes_e006_never_adds_new_codes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("helper.bat"), "set SHARED=1\r\n").unwrap();
        let path = write_script(dir.path(), "a.bat", "@echo off\r\ncall helper.bat\r\necho %SHARED%\r\n");

        let mut without = LintOptions::default();
        without.follow_calls = false;
        let diags_without = lint(&path, &without).unwrap();

        let mut with = LintOptions::default();
        with.follow_calls = true;
        let diags_with = lint(&path, &with).unwrap();

        assert!(diags_without.iter().any(|d| d.rule_code == "E006" && d.line_number == 3));
        assert!(!diags_with.iter().any(|d| d.rule_code == "E006" && d.line_number == 3));

        let without_codes: HashSet<&str> = diags_without.iter().map(|d| d.rule_code.as_str()).collect();
        let with_codes: HashSet<&str> = diags_with.iter().map(|d| d.rule_code.as_str()).collect();
        assert!(with_codes.difference(&without_codes).all(|c| *c != "E006"));
    }

    #[test]
    fn output_is_deterministic_across_repeated_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "a.bat", "@echo off\r\nif \"%x%\"==\"1\" echo y\r\n");
        let options = LintOptions::default();
        let first = lint(&path, &options).unwrap();
        let second = lint(&path, &options).unwrap();
        assert_eq!(first, second);
    }
}
