use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use cssdeps_check::{CheckResult, Config};
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cssdeps")]
#[command(about = "Extract and check the dependencies of stylesheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the @import and url() dependencies of every stylesheet
    Deps(Config),
    /// Report missing dependencies and malformed @import rules
    Check(Config),
}

fn print_footer<W: Write>(writer: &mut W, result: &CheckResult, start: Instant) -> Result<()> {
    writeln!(
        writer,
        "\n{} Finished in {}ms on {} files (using {} threads).",
        "●".bright_blue(),
        start.elapsed().as_millis().to_string().cyan(),
        result.files_analyzed.to_string().cyan(),
        rayon::current_num_threads().to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Deps(cfg) => {
            info!(
                "Listing stylesheet dependencies (using {} threads)",
                rayon::current_num_threads()
            );
            let include_external = cfg.include_external;
            let json = cfg.json;

            let result = cssdeps_check::run_dependency_check(cfg)?;
            if json {
                cssdeps_check::print_json(&mut stdout, &result)?;
            } else {
                cssdeps_check::print_dependency_tree(&mut stdout, &result, include_external)?;
                print_footer(&mut stdout, &result, start)?;
            }
            Ok(())
        }
        Commands::Check(cfg) => {
            info!(
                "Checking stylesheet dependencies (using {} threads)",
                rayon::current_num_threads()
            );
            let json = cfg.json;

            let result = cssdeps_check::run_dependency_check(cfg)?;
            debug!("Found {} warnings", result.warnings.len());

            if json {
                cssdeps_check::print_json(&mut stdout, &result)?;
            } else if result.warnings.is_empty() {
                cssdeps_check::print_no_issues_message(&mut stdout, result.files_analyzed)?;
                print_footer(&mut stdout, &result, start)?;
            } else {
                cssdeps_check::print_warnings(&mut stdout, &result)?;
                print_footer(&mut stdout, &result, start)?;
            }

            if !result.warnings.is_empty() {
                stdout.flush()?;
                // Non-zero exit to fail CI
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
