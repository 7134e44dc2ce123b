//! Blinter: a static analyzer for Windows batch (`.bat`) and cmd (`.cmd`)
//! scripts. The core is [`engine::lint`], a pure function from a script path
//! and [`config::LintOptions`] to a list of [`types::Diagnostic`]s or a
//! [`types::LoadError`]. Everything outside `engine`/`rules`/`lexical`/
//! `source`/`classify`/`catalog`/`types` is an external collaborator: CLI
//! argument parsing, directory discovery, and config-file parsing, all of
//! which call into the core rather than being part of it.

pub mod catalog;
pub mod cli;
pub mod classify;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod lexical;
pub mod rules;
pub mod source;
pub mod types;

pub use config::LintOptions;
pub use engine::lint;
pub use types::{Diagnostic, LoadError, Rule, RuleSeverity};
