//! # Availability Matrix CLI

use clap::{Parser, Subcommand};
use matrix_cli::commands::{self, EvaluateArgs, GenerateArgs, ServicesArgs};
use matrix_cli::CliError;
use matrix_core::config::RuntimeConfig;
use matrix_core::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matrix", version)]
#[command(about = "Composite product availability across regions and languages")]
struct Cli {
    /// Runtime configuration (TOML); MATRIX_* environment variables fill the gaps
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate the product matrix under a policy
    Evaluate(EvaluateArgs),
    /// Write a random fact table over the preset identifiers
    Generate(GenerateArgs),
    /// Print the service dashboard for one region
    Services(ServicesArgs),
    /// List registered policies and their statuses
    Policies,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => {
            log::warn!("One or more cells failed");
            std::process::exit(1);
        }
        Err(error) => {
            matrix_core::log_error!(error.code(), "Command failed", "error" => &error);
            eprintln!("error [{}]: {}", error.code(), error);
            if error.is_recoverable() {
                eprintln!("hint: complete the fact data and rerun");
            }
            std::process::exit(error.exit_code());
        }
    }
}

/// Run the selected command; `Ok(false)` means some cells failed
fn run(cli: &Cli) -> Result<bool, CliError> {
    let mut runtime = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if cli.verbose {
        runtime.logging.min_log_level = matrix_core::config::LogLevel::Debug;
    }
    if let Err(reason) = logging::init_global_logging(&runtime.logging) {
        log::warn!("{}", reason);
    }

    let (outcome, output) = match &cli.command {
        Command::Evaluate(args) => (commands::evaluate::run(args, &runtime)?, args.output.as_deref()),
        Command::Generate(args) => (commands::generate::run(args)?, args.output.as_deref()),
        Command::Services(args) => (commands::services::run(args)?, args.output.as_deref()),
        Command::Policies => (commands::policies::run(&runtime)?, None),
    };

    commands::emit(&outcome.rendered, output)?;
    Ok(outcome.success)
}
