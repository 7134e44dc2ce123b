//! E008/W001: control flow reachability, backed by the reachability map
//! [`AnalysisContext::build`] computes while scanning for GOTO/EXIT targets.

use crate::classify::Line;
use crate::rules::context::{AnalysisContext, Reachability};
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::sync::LazyLock;

/// E008: a code line sits after an unconditional top-level GOTO or EXIT with
/// no intervening label to make it reachable again.
pub struct UnreachableCode;

impl FileRule for UnreachableCode {
    fn code(&self) -> &'static str {
        "E008"
    }

    fn check(&self, lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        lines
            .iter()
            .filter(|line| line.is_code())
            .filter_map(|line| {
                let blocked = !matches!(
                    ctx.reachability_map.get(&line.index),
                    Some(Reachability::Reachable) | None
                );
                blocked.then(|| Diagnostic::new(line.index, self.code()))
            })
            .collect()
    }
}

static ENDS_SCRIPT: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?i)^\s*(exit|goto\s+:?eof)\b").unwrap());

/// W001: the script's last statement is not an explicit EXIT/GOTO :EOF, so
/// control can fall off the end into whatever invoked it.
pub struct FallThroughWithoutExit;

impl FileRule for FallThroughWithoutExit {
    fn code(&self) -> &'static str {
        "W001"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let Some(last) = lines.iter().rev().find(|l| l.is_code()) else {
            return Vec::new();
        };
        if ENDS_SCRIPT.is_match(&last.text) {
            Vec::new()
        } else {
            vec![Diagnostic::new(last.index, self.code())]
        }
    }
}
