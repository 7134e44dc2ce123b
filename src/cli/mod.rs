//! External-collaborator CLI surface (spec.md §6). Thin wrapper around
//! `engine::lint` — no rule logic lives here.

pub mod explain;
pub mod output;

use crate::types::Diagnostic;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "blinter", version, about = "Static analysis for Windows batch/cmd scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint a single script or every .bat/.cmd file under a directory
    Check {
        /// File or directory to lint
        path: PathBuf,

        /// Print aggregate counts after per-file output
        #[arg(long)]
        summary: bool,

        /// Overrides the configured/default line-length limit (S011)
        #[arg(long)]
        max_line_length: Option<usize>,

        /// Limits a directory walk to depth 1
        #[arg(long)]
        no_recursive: bool,

        /// Merges variable definitions from CALLed scripts (component C7)
        #[arg(long)]
        follow_calls: bool,

        /// Ignore any on-disk configuration file
        #[arg(long)]
        no_config: bool,

        /// Write the default configuration next to `path` and exit without linting
        #[arg(long)]
        create_config: bool,

        /// Path to a configuration file, overriding the default search
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
    /// Create a default .blinterrc.toml in the current directory
    Init,
    /// Explain what a rule checks for and why (omit the code to list all)
    Explain {
        /// Rule code, e.g. E006 or SEC011
        code: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
}

/// Aggregates per-file diagnostics for the output renderers and the exit
/// code decision (spec.md §6: 0/no errors, 1/has errors, 2/load failure).
#[derive(Debug, Default)]
pub struct Report {
    pub files: Vec<(PathBuf, Vec<Diagnostic>)>,
}

impl Report {
    pub fn total_diagnostics(&self) -> usize {
        self.files.iter().map(|(_, d)| d.len()).sum()
    }

    pub fn has_error_severity(&self) -> bool {
        self.files.iter().any(|(_, diags)| {
            diags.iter().any(|d| {
                crate::catalog::by_code(&d.rule_code)
                    .is_some_and(|r| r.severity == crate::types::RuleSeverity::Error)
            })
        })
    }

    pub fn count_by_severity(&self, severity: crate::types::RuleSeverity) -> usize {
        self.files
            .iter()
            .flat_map(|(_, diags)| diags.iter())
            .filter(|d| crate::catalog::by_code(&d.rule_code).is_some_and(|r| r.severity == severity))
            .count()
    }
}

pub(crate) fn relative_path(file: &Path, root: &Path) -> String {
    file.strip_prefix(root).unwrap_or(file).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_error_severity_true_when_any_file_has_an_error_code() {
        let report = Report {
            files: vec![(PathBuf::from("a.bat"), vec![Diagnostic::new(1, "E001")])],
        };
        assert!(report.has_error_severity());
    }

    #[test]
    fn has_error_severity_false_for_style_only() {
        let report = Report {
            files: vec![(PathBuf::from("a.bat"), vec![Diagnostic::new(1, "S011")])],
        };
        assert!(!report.has_error_severity());
    }
}
