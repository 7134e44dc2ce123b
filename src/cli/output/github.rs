use std::path::Path;

use crate::cli::{relative_path, Report};
use crate::types::RuleSeverity;

pub fn render(report: &Report, project_root: &Path) {
    for (file, diagnostics) in &report.files {
        let rel = relative_path(file, project_root);
        for d in diagnostics {
            let severity = crate::catalog::by_code(&d.rule_code).map(|r| r.severity);
            let level = match severity {
                Some(RuleSeverity::Error) => "error",
                Some(RuleSeverity::Warning) | Some(RuleSeverity::Security) | Some(RuleSeverity::Performance) => {
                    "warning"
                }
                _ => "notice",
            };
            println!(
                "::{level} file={rel},line={line},title={code}::{msg}",
                line = d.line_number,
                code = d.rule_code,
                msg = super::message_for(d),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diagnostic;
    use std::path::PathBuf;

    #[test]
    fn style_diagnostics_render_as_notice_level() {
        let report = Report {
            files: vec![(PathBuf::from("a.bat"), vec![Diagnostic::new(1, "S011")])],
        };
        // Smoke test: rendering must not panic for every severity family.
        render(&report, Path::new("."));
    }
}
