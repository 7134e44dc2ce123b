//! E006/W027/W038/S015: variable definition/reference bookkeeping.

use crate::classify::Line;
use crate::rules::context::AnalysisContext;
use crate::rules::FileRule;
use crate::types::Diagnostic;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Environment variables CMD.EXE defines itself; referencing one of these
/// without a local SET is not an error (spec.md §3).
const WELL_KNOWN_VARS: &[&str] = &[
    "PATH",
    "TEMP",
    "TMP",
    "USERPROFILE",
    "APPDATA",
    "LOCALAPPDATA",
    "WINDIR",
    "SYSTEMROOT",
    "COMSPEC",
    "HOMEDRIVE",
    "HOMEPATH",
    "USERNAME",
    "COMPUTERNAME",
    "PROCESSOR_ARCHITECTURE",
    "PROCESSOR_IDENTIFIER",
    "NUMBER_OF_PROCESSORS",
    "ERRORLEVEL",
    "RANDOM",
    "DATE",
    "TIME",
    "CD",
    "CMDCMDLINE",
    "CMDEXTVERSION",
    "OS",
    "PATHEXT",
    "PROMPT",
];

fn is_well_known(name: &str) -> bool {
    WELL_KNOWN_VARS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// E006: `%VAR%`/`!VAR!` referenced before (or without ever) being SET, and
/// not one of CMD's own well-known variables.
pub struct UndefinedVariable;

impl FileRule for UndefinedVariable {
    fn code(&self) -> &'static str {
        "E006"
    }

    fn check(&self, _lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags: Vec<Diagnostic> = ctx
            .variables_referenced
            .iter()
            .filter(|(name, line)| !is_well_known(name) && !ctx.variable_defined_at_or_before(name, *line))
            .map(|(_, line)| Diagnostic::new(*line, self.code()))
            .collect();
        diags.sort_by_key(|d| d.line_number);
        diags
    }
}

/// W027: a variable is assigned but never read anywhere in the file.
pub struct UnusedVariable;

impl FileRule for UnusedVariable {
    fn code(&self) -> &'static str {
        "W027"
    }

    fn check(&self, _lines: &[Line], ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut diags: Vec<Diagnostic> = ctx
            .variables_defined
            .iter()
            .filter(|(name, _)| !ctx.variables_referenced.iter().any(|(r, _)| r == *name))
            .map(|(_, line)| Diagnostic::new(*line, self.code()))
            .collect();
        diags.sort_by_key(|d| d.line_number);
        diags
    }
}

static SET_NAME: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r#"(?i)^\s*set\s+(/a\s+|/p\s+)?"?([A-Za-z_][\w]*)\s*[=]"#).unwrap()
});

/// W038: a local SET assignment reuses the name of a well-known environment
/// variable, silently overriding it for the rest of the script.
pub struct ShadowsWellKnownVariable;

impl FileRule for ShadowsWellKnownVariable {
    fn code(&self) -> &'static str {
        "W038"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        lines
            .iter()
            .filter(|l| l.is_code())
            .filter_map(|line| {
                let caps = SET_NAME.captures(&line.text)?;
                let name = caps.get(2)?.as_str();
                is_well_known(name).then(|| Diagnostic::new(line.index, "W038"))
            })
            .collect()
    }
}

static VAR_OCCURRENCE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"%([A-Za-z_][\w]*)%|!([A-Za-z_][\w]*)!").unwrap());

/// S015: the same variable referenced with more than one casing across the
/// file (`%Foo%` ... `%FOO%`).
pub struct InconsistentVariableCasing;

impl FileRule for InconsistentVariableCasing {
    fn code(&self) -> &'static str {
        "S015"
    }

    fn check(&self, lines: &[Line], _ctx: &AnalysisContext) -> Vec<Diagnostic> {
        let mut first_seen: HashMap<String, String> = HashMap::new();
        let mut diags = Vec::new();
        for line in lines {
            if !line.is_code() {
                continue;
            }
            for caps in VAR_OCCURRENCE.captures_iter(&line.text) {
                let name = caps.get(1).or_else(|| caps.get(2)).unwrap().as_str();
                let key = name.to_ascii_uppercase();
                match first_seen.get(&key) {
                    Some(spelling) if spelling != name => {
                        diags.push(Diagnostic::new(line.index, self.code()));
                    }
                    Some(_) => {}
                    None => {
                        first_seen.insert(key, name.to_string());
                    }
                }
            }
        }
        diags
    }
}
