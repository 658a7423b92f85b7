mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use eventprep_clean::{CleanError, CleanOptions, CleaningEngine};
use eventprep_core::PipelineConfig;
use eventprep_validate::{ValidateError, ValidationEngine, ValidationOptions};

#[derive(Debug, Error)]
enum CliError {
    #[error("clean error: {0}")]
    Clean(#[from] CleanError),
    #[error("validate error: {0}")]
    Validate(#[from] ValidateError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "eventprep", version, about = "Conflict-event cleaning and validation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean and merge the three window extracts into one table.
    Clean(CleanArgs),
    /// Run the five diagnostic passes over the raw window extracts.
    Validate(ValidateArgs),
    /// Validate, then clean. Findings never block the cleaning path.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// TOML pipeline configuration; defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Override the configured output path.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Skip writing cleaning_report.json.
    #[arg(long, default_value_t = false)]
    no_report: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// TOML pipeline configuration; defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output directory for validation artifacts.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
    /// Limit findings listed in the rendered report.
    #[arg(long, default_value_t = 20)]
    max_examples: usize,
    /// Emit findings.json with the full findings list.
    #[arg(long, default_value_t = false)]
    write_findings: bool,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// TOML pipeline configuration; defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Clean(args) => run_clean(args),
        Command::Validate(args) => run_validate(args),
        Command::Run(args) => run_all(args),
    }
}

fn run_clean(args: CleanArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let options = CleanOptions {
        out_path: args.out,
        write_report: !args.no_report,
    };
    let result = CleaningEngine::new(options).run(&config)?;

    println!("cleaned table: {}", result.output_path.display());
    if let Some(path) = &result.report_path {
        println!("cleaning report: {}", path.display());
    }
    println!(
        "rows: {} | ready: {}",
        result.report.total_rows, result.report.readiness.ready
    );
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let options = ValidationOptions {
        out_dir: args.out,
        max_examples: args.max_examples,
        write_findings: args.write_findings,
    };
    let result = ValidationEngine::new(options).run(&config)?;

    println!("{}", result.rendered);
    println!();
    println!("metrics: {}", result.metrics_path.display());
    println!("report: {}", result.report_path.display());
    Ok(())
}

fn run_all(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    let validation = ValidationEngine::new(ValidationOptions::default()).run(&config)?;
    println!(
        "validation: {} finding(s), report at {}",
        validation.report.findings_total,
        validation.report_path.display()
    );

    let cleaning = CleaningEngine::new(CleanOptions::default()).run(&config)?;
    println!(
        "cleaning: {} rows, ready: {}, table at {}",
        cleaning.report.total_rows,
        cleaning.report.readiness.ready,
        cleaning.output_path.display()
    );
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<PipelineConfig, CliError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|err| CliError::InvalidConfig(format!("{}: {err}", path.display())))
        }
        None => Ok(PipelineConfig::default()),
    }
}
