use anyhow::Result;
use clap::Parser;
use rayon::prelude::*;

use blinter::cli::output::render;
use blinter::cli::{Cli, Commands, Report};
use blinter::config::file::Config;
use blinter::discovery;
use blinter::engine;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            path,
            summary,
            max_line_length,
            no_recursive,
            follow_calls,
            no_config,
            create_config,
            config,
            format,
        } => {
            let target = path.canonicalize().unwrap_or(path);

            if create_config {
                let dest = target.join(".blinterrc.toml");
                if dest.exists() {
                    eprintln!("{} already exists", dest.display());
                    std::process::exit(1);
                }
                std::fs::write(&dest, Config::default_toml())?;
                println!("Created {}", dest.display());
                return Ok(());
            }

            let file_config = if no_config {
                Config::default()
            } else {
                Config::load(config.as_deref(), &target)?
            };

            let mut options = file_config.to_lint_options();
            if let Some(n) = max_line_length {
                options.max_line_length = n;
            }
            if no_recursive {
                options.recursive = false;
            }
            if follow_calls {
                options.follow_calls = true;
            }

            let project_root = if target.is_dir() { target.clone() } else { target.parent().unwrap_or(&target).to_path_buf() };

            let targets = discovery::discover(&target, options.recursive);
            if targets.is_empty() {
                eprintln!("no .bat/.cmd files found under {}", target.display());
                std::process::exit(2);
            }

            let is_single_file_target = targets.len() == 1 && targets[0] == target;
            let files: Vec<(std::path::PathBuf, Vec<blinter::Diagnostic>)> = targets
                .par_iter()
                .filter_map(|file| match engine::lint(file, &options) {
                    Ok(diags) => Some((file.clone(), diags)),
                    Err(err) => {
                        tracing::warn!(file = %file.display(), error = %err, "skipping file that failed to load");
                        None
                    }
                })
                .collect();

            if is_single_file_target && files.is_empty() {
                eprintln!("failed to load {}", target.display());
                std::process::exit(2);
            }

            let report = Report { files };
            let output_format = format.unwrap_or_default();
            render(&report, &project_root, output_format);

            if summary {
                println!(
                    "{} files scanned, {} diagnostics",
                    targets.len(),
                    report.total_diagnostics()
                );
            }

            if report.has_error_severity() {
                std::process::exit(1);
            }
        }
        Commands::Init => {
            let dest = std::env::current_dir()?.join(".blinterrc.toml");
            if dest.exists() {
                eprintln!(".blinterrc.toml already exists");
                std::process::exit(1);
            }
            std::fs::write(&dest, Config::default_toml())?;
            println!("Created .blinterrc.toml");
        }
        Commands::Explain { code: None } => {
            println!("{}", blinter::cli::explain::list_rules());
        }
        Commands::Explain { code: Some(code) } => match blinter::cli::explain::explain(&code) {
            Some(text) => println!("{text}"),
            None => {
                eprintln!("Unknown rule: {code}\n");
                eprintln!("{}", blinter::cli::explain::list_rules());
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
