use owo_colors::OwoColorize;
use std::path::Path;

use crate::cli::{relative_path, Report};
use crate::types::RuleSeverity;

pub fn render(report: &Report, project_root: &Path) {
    if report.total_diagnostics() == 0 {
        println!();
        println!("  {}", "\u{2501}".repeat(50).dimmed());
        println!("  {}", "no issues found".green());
        println!();
        return;
    }

    for (file, diagnostics) in &report.files {
        if diagnostics.is_empty() {
            continue;
        }
        println!("{}", relative_path(file, project_root).bold());
        for d in diagnostics {
            let severity = crate::catalog::by_code(&d.rule_code).map(|r| r.severity);
            let (icon, code) = match severity {
                Some(RuleSeverity::Error) => ("\u{2717}".red().to_string(), d.rule_code.red().bold().to_string()),
                Some(RuleSeverity::Warning) => {
                    ("\u{26a0}".yellow().to_string(), d.rule_code.yellow().bold().to_string())
                }
                Some(RuleSeverity::Security) => {
                    ("\u{2622}".magenta().to_string(), d.rule_code.magenta().bold().to_string())
                }
                Some(RuleSeverity::Performance) => {
                    ("\u{26a1}".cyan().to_string(), d.rule_code.cyan().bold().to_string())
                }
                _ => ("\u{2139}".blue().to_string(), d.rule_code.blue().bold().to_string()),
            };
            println!("  {icon} L{:<4} {code} {}", d.line_number, super::message_for(d));
        }
    }

    println!();
    println!("  {}", "\u{2501}".repeat(50).dimmed());
    let errors = report.count_by_severity(RuleSeverity::Error);
    let warnings = report.count_by_severity(RuleSeverity::Warning);
    let security = report.count_by_severity(RuleSeverity::Security);
    let performance = report.count_by_severity(RuleSeverity::Performance);
    let style = report.count_by_severity(RuleSeverity::Style);
    println!(
        "  {} errors, {} warnings, {} security, {} performance, {} style",
        errors.to_string().red().bold(),
        warnings.to_string().yellow().bold(),
        security.to_string().magenta().bold(),
        performance.to_string().cyan().bold(),
        style.to_string().blue().bold(),
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diagnostic;
    use std::path::PathBuf;

    #[test]
    fn count_by_severity_matches_catalog_lookup() {
        let report = Report {
            files: vec![(PathBuf::from("a.bat"), vec![Diagnostic::new(1, "E006"), Diagnostic::new(2, "S011")])],
        };
        assert_eq!(report.count_by_severity(RuleSeverity::Error), 1);
        assert_eq!(report.count_by_severity(RuleSeverity::Style), 1);
    }
}
