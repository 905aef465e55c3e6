//! Parma Health Toolkit CLI.
//!
//! Reads a tabular file, applies anonymization rules, writes the result.

use clap::{Args, Parser, Subcommand};
use ph_core::config::{load_rules, resolve_rules, ConfigError, RULES_ENV};
use ph_core::exit_codes::ExitCode;
use ph_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use ph_core::pipeline::{self, PipelineError};
use ph_connectors::ConnectorError;
use std::path::PathBuf;
use tracing::{debug, error, info, info_span};

/// Parma Health Toolkit CLI
#[derive(Parser)]
#[command(name = "parma")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Test command
    Hello,

    /// Run the anonymization pipeline (CSV in, CSV out)
    Run(RunArgs),

    /// Validate a rule file without processing data
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Path to input file
    #[arg(long)]
    source: PathBuf,

    /// Path to output file
    #[arg(long, default_value = "output.csv")]
    destination: PathBuf,

    /// Rule file (.json, .toml, .yaml); without one the data passes through unchanged
    #[arg(long, env = RULES_ENV)]
    rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Rule file to check
    #[arg(long)]
    rules: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(cli.global.log_level, cli.global.log_format);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = info_span!("parma", run_id = %run_id);
    let _guard = span.enter();

    let exit_code = match cli.command {
        Commands::Hello => {
            println!("Hello from Parma Health Toolkit!");
            ExitCode::Clean
        }
        Commands::Run(args) => run_pipeline(&args),
        Commands::Validate(args) => run_validate(&args),
    };

    debug!(exit = %exit_code, "Command finished");
    std::process::exit(exit_code.as_i32());
}

fn run_pipeline(args: &RunArgs) -> ExitCode {
    if !args.source.exists() {
        eprintln!(
            "Error: Invalid value for '--source': Path '{}' does not exist.",
            args.source.display()
        );
        return ExitCode::ArgsError;
    }

    println!(
        "Processing {} -> {}",
        args.source.display(),
        args.destination.display()
    );

    // clap has already folded PH_RULES into `args.rules`
    let rules = match resolve_rules(args.rules.as_deref()) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("Error: {}", e);
            return config_exit_code(&e);
        }
    };

    println!("Reading and writing data...");
    match pipeline::run(&args.source, &args.destination, rules.as_ref()) {
        Ok(summary) => {
            info!(
                rows = summary.rows,
                columns_in = summary.columns_in,
                columns_out = summary.columns_out,
                "Pipeline finished"
            );
            if !summary.outcomes.is_empty() {
                println!(
                    "Applied {} rule(s), {} skipped (field not present)",
                    summary.outcomes.len() - summary.skipped(),
                    summary.skipped()
                );
            }
            println!("Done!");
            ExitCode::Clean
        }
        Err(e @ PipelineError::Connector(ConnectorError::UnsupportedFormat { .. })) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
        Err(e) => {
            error!(error = %e, "Pipeline failed");
            eprintln!("Error processing file: {}", e);
            e.exit_code()
        }
    }
}

fn run_validate(args: &ValidateArgs) -> ExitCode {
    match load_rules(&args.rules) {
        Ok(loaded) => {
            for (idx, rule) in loaded.config.rules().iter().enumerate() {
                println!("{:>3}. {}", idx + 1, rule);
            }
            println!(
                "{} rule(s) OK (sha256 {})",
                loaded.config.len(),
                loaded.content_hash
            );
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            config_exit_code(&e)
        }
    }
}

fn config_exit_code(error: &ConfigError) -> ExitCode {
    match error {
        ConfigError::NotFound { .. } => ExitCode::ArgsError,
        ConfigError::IoError { .. } => ExitCode::IoError,
        ConfigError::ParseError { .. } | ConfigError::UnsupportedFormat { .. } => {
            ExitCode::ConfigError
        }
    }
}
