//! The on-disk configuration format (spec.md §6): an INI-flavored TOML file
//! with a `[general]` section of scalar overrides and a `[rules]` section of
//! CSV rule-code lists. Parsing this is an external-collaborator concern;
//! the result is translated into the core's [`super::LintOptions`].

use crate::types::RuleSeverity;
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub rules: RulesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub recursive: bool,
    pub show_summary: bool,
    pub max_line_length: usize,
    pub follow_calls: bool,
    pub min_severity: Option<RuleSeverity>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub enabled_rules: Option<String>,
    pub disabled_rules: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            show_summary: false,
            max_line_length: 100,
            follow_calls: false,
            min_severity: None,
        }
    }
}

fn parse_csv(csv: &str) -> HashSet<String> {
    csv.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    /// Loads `config_path` if given, else `<search_root>/.blinterrc.toml` if
    /// it exists, else the built-in defaults.
    pub fn load(config_path: Option<&Path>, search_root: &Path) -> Result<Self> {
        let path = config_path.map(Path::to_path_buf).or_else(|| {
            let default = search_root.join(".blinterrc.toml");
            default.exists().then_some(default)
        });

        match path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)?;
                toml::from_str(&content).map_err(|e| anyhow::anyhow!("config parse error: {e}"))
            }
            None => Ok(Config::default()),
        }
    }

    /// Translates the on-disk shape into the core's [`super::LintOptions`].
    /// CLI flags are applied by the caller afterward, per spec.md §6's
    /// precedence rule ("Command-line flags override file settings").
    pub fn to_lint_options(&self) -> super::LintOptions {
        super::LintOptions {
            max_line_length: self.general.max_line_length,
            enabled_rules: self.rules.enabled_rules.as_deref().map(parse_csv),
            disabled_rules: parse_csv(&self.rules.disabled_rules),
            min_severity: self.general.min_severity,
            follow_calls: self.general.follow_calls,
            recursive: self.general.recursive,
            max_input_bytes: crate::source::DEFAULT_MAX_INPUT_BYTES,
        }
    }

    pub const fn default_toml() -> &'static str {
        r#"# blinter configuration

[general]
# Recurse into subdirectories when a directory is passed on the command line.
recursive = true
# Print aggregate counts after per-file output.
show_summary = false
# Flag lines longer than this many characters (S011).
max_line_length = 100
# Merge variable definitions from CALLed scripts (component C7).
follow_calls = false
# Drop diagnostics below this severity. One of: error, warning, security,
# performance, style. Omit to keep everything.
# min_severity = "warning"

[rules]
# Comma-separated rule codes. Leave enabled_rules unset to allow everything
# not explicitly disabled.
# enabled_rules = "E001,E006,W004"
disabled_rules = ""
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_spec_defaults() {
        let config = Config::default();
        assert!(config.general.recursive);
        assert!(!config.general.show_summary);
        assert_eq!(config.general.max_line_length, 100);
        assert!(!config.general.follow_calls);
        assert!(config.general.min_severity.is_none());
    }

    #[test]
    fn parses_rules_section_csv_lists() {
        let toml_str = r#"
[general]
follow_calls = true

[rules]
enabled_rules = "E001, e006,W004"
disabled_rules = "S011"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let opts = config.to_lint_options();
        assert!(opts.follow_calls);
        assert_eq!(
            opts.enabled_rules,
            Some(["E001", "E006", "W004"].into_iter().map(String::from).collect())
        );
        assert!(opts.disabled_rules.contains("S011"));
    }

    #[test]
    fn missing_rules_section_leaves_enabled_rules_null() {
        let config: Config = toml::from_str("[general]\n").unwrap();
        assert!(config.to_lint_options().enabled_rules.is_none());
    }

    #[test]
    fn load_with_no_path_and_no_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.general.max_line_length, 100);
    }

    #[test]
    fn load_finds_default_file_in_search_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".blinterrc.toml"), "[general]\nmax_line_length = 80\n").unwrap();
        let config = Config::load(None, dir.path()).unwrap();
        assert_eq!(config.general.max_line_length, 80);
    }
}
