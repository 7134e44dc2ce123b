pub mod github;
pub mod json;
pub mod text;

use crate::cli::{OutputFormat, Report};
use crate::types::Diagnostic;
use std::path::Path;

pub fn render(report: &Report, project_root: &Path, format: OutputFormat) {
    match format {
        OutputFormat::Text => text::render(report, project_root),
        OutputFormat::Json => json::render(report, project_root),
        OutputFormat::Github => github::render(report, project_root),
    }
}

/// Renders a diagnostic's rule name plus, if present, its context note —
/// the catalog carries the full explanation/recommendation text, which
/// `explain` prints separately rather than repeating on every finding line.
fn message_for(d: &Diagnostic) -> String {
    let name = crate::catalog::by_code(&d.rule_code).map(|r| r.name).unwrap_or(&d.rule_code);
    match &d.context_note {
        Some(note) => format!("{name} ({note})"),
        None => name.to_string(),
    }
}
