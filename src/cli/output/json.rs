use serde::Serialize;
use std::path::Path;

use crate::cli::{relative_path, Report};
use crate::types::RuleSeverity;

#[derive(Serialize)]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    file: String,
    line: usize,
    rule_code: String,
    severity: Option<RuleSeverity>,
    message: String,
}

#[derive(Serialize)]
struct JsonSummary {
    errors: usize,
    warnings: usize,
    security: usize,
    performance: usize,
    style: usize,
}

fn build_output(report: &Report, project_root: &Path) -> JsonOutput {
    let diagnostics = report
        .files
        .iter()
        .flat_map(|(file, diags)| {
            diags.iter().map(move |d| JsonDiagnostic {
                file: relative_path(file, project_root),
                line: d.line_number,
                rule_code: d.rule_code.clone(),
                severity: crate::catalog::by_code(&d.rule_code).map(|r| r.severity),
                message: super::message_for(d),
            })
        })
        .collect();

    JsonOutput {
        diagnostics,
        summary: JsonSummary {
            errors: report.count_by_severity(RuleSeverity::Error),
            warnings: report.count_by_severity(RuleSeverity::Warning),
            security: report.count_by_severity(RuleSeverity::Security),
            performance: report.count_by_severity(RuleSeverity::Performance),
            style: report.count_by_severity(RuleSeverity::Style),
        },
    }
}

pub fn render(report: &Report, project_root: &Path) {
    let output = build_output(report, project_root);
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diagnostic;
    use std::path::PathBuf;

    #[test]
    fn json_output_is_valid_and_summarizes_correctly() {
        let report = Report {
            files: vec![(PathBuf::from("/project/a.bat"), vec![Diagnostic::new(10, "E006")])],
        };
        let output = build_output(&report, Path::new("/project"));
        let json = serde_json::to_string_pretty(&output).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["errors"], 1);
        assert_eq!(parsed["diagnostics"][0]["file"], "a.bat");
    }
}
