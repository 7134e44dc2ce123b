//! Component C7: merges variable definitions from `CALL`ed scripts into the
//! caller's context so C6's undefined-variable check can see across file
//! boundaries without the rule engines themselves knowing about the
//! filesystem.

use crate::classify::{self, Line};
use crate::rules::context::AnalysisContext;
use crate::source;
use crate::types::Diagnostic;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static CALL_TARGET: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"(?i)^\s*call\s+"?([^\s"&|<>^]+\.(?:bat|cmd))"?"#).unwrap()
});
static CALL_TARGET_NO_EXT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"(?i)^\s*call\s+"?([^\s"&|<>^.]+)(?:\s|$)"#).unwrap());

/// Resolves `target` against `script_dir`, trying `.bat` then `.cmd` when
/// the call site names no extension.
fn resolve_target(script_dir: &Path, target: &str) -> Option<PathBuf> {
    let candidate = script_dir.join(target);
    if candidate.is_file() {
        return Some(candidate);
    }
    for ext in ["bat", "cmd"] {
        let with_ext = script_dir.join(format!("{target}.{ext}"));
        if with_ext.is_file() {
            return Some(with_ext);
        }
    }
    None
}

fn call_target_for(text: &str) -> Option<&str> {
    CALL_TARGET
        .captures(text)
        .or_else(|| CALL_TARGET_NO_EXT.captures(text))
        .map(|caps| caps.get(1).unwrap().as_str())
}

/// Follows every resolvable `CALL` in `lines`, merging each target's
/// variable definitions into `ctx` at the calling line, and returns any
/// `CallTargetMissing` diagnostics for targets that could not be resolved.
///
/// `visited` is scoped to one root analysis (spec.md §5): it is seeded with
/// the calling script's own canonical path before the first call so a
/// self-recursive `CALL` cannot loop forever, and grows as callees are
/// followed transitively.
pub fn follow(
    script_dir: &Path,
    lines: &[Line],
    ctx: &mut AnalysisContext,
    visited: &mut HashSet<PathBuf>,
    max_input_bytes: u64,
) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    for line in lines.iter().filter(|l| l.is_code()) {
        let Some(target) = call_target_for(&line.text) else { continue };

        let Some(resolved) = resolve_target(script_dir, target) else {
            diags.push(Diagnostic::new(line.index, "W003"));
            continue;
        };

        let canonical = resolved.canonicalize().unwrap_or(resolved.clone());
        if !visited.insert(canonical.clone()) {
            continue;
        }

        let Ok(callee_script) = source::load(&resolved, max_input_bytes) else {
            diags.push(Diagnostic::new(line.index, "W003"));
            continue;
        };
        let callee_lines = classify::classify(&callee_script);
        let callee_ctx = AnalysisContext::build(&callee_lines);

        for name in callee_ctx.variables_defined.keys() {
            ctx.define_variable(name, line.index);
        }

        let callee_dir = resolved.parent().unwrap_or(script_dir);
        diags.extend(follow(callee_dir, &callee_lines, ctx, visited, max_input_bytes));
    }

    diags
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
    fn unresolvable_call_target_is_non_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let lines = vec![code(1, "call missing.bat")];
        let mut ctx = AnalysisContext::new();
        let mut visited = HashSet::new();
        let diags = follow(dir.path(), &lines, &mut ctx, &mut visited, source::DEFAULT_MAX_INPUT_BYTES);
        assert_eq!(diags, vec![Diagnostic::new(1, "W003")]);
    }

    #[test]
    fn resolved_call_merges_callee_variables_at_call_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("helper.bat"), "set HELPERVAR=1\r\n").unwrap();
        let lines = vec![code(5, "call helper.bat")];
        let mut ctx = AnalysisContext::new();
        let mut visited = HashSet::new();
        let diags = follow(dir.path(), &lines, &mut ctx, &mut visited, source::DEFAULT_MAX_INPUT_BYTES);
        assert!(diags.is_empty());
        assert!(ctx.variable_defined_at_or_before("HELPERVAR", 5));
    }

    #[test]
    fn extensionless_target_tries_bat_then_cmd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("helper.cmd"), "set X=1\r\n").unwrap();
        let lines = vec![code(1, "call helper")];
        let mut ctx = AnalysisContext::new();
        let mut visited = HashSet::new();
        let diags = follow(dir.path(), &lines, &mut ctx, &mut visited, source::DEFAULT_MAX_INPUT_BYTES);
        assert!(diags.is_empty());
        assert!(ctx.variable_defined_at_or_before("X", 1));
    }

    #[test]
    fn self_recursive_call_does_not_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.bat");
        std::fs::write(&path, "call loop.bat\r\n").unwrap();
        let lines = vec![code(1, "call loop.bat")];
        let mut ctx = AnalysisContext::new();
        let mut visited = HashSet::new();
        visited.insert(path.canonicalize().unwrap());
        let diags = follow(dir.path(), &lines, &mut ctx, &mut visited, source::DEFAULT_MAX_INPUT_BYTES);
        assert!(diags.is_empty());
    }

    #[test]
    fn caller_own_definition_wins_over_imported_one() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("helper.bat"), "set X=imported\r\n").unwrap();
        let mut ctx = AnalysisContext::new();
        ctx.define_variable("X", 1);
        let lines = vec![code(2, "call helper.bat")];
        let mut visited = HashSet::new();
        follow(dir.path(), &lines, &mut ctx, &mut visited, source::DEFAULT_MAX_INPUT_BYTES);
        assert!(ctx.variable_defined_at_or_before("X", 1));
    }
}
