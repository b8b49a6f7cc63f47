//! `matrix generate`

use super::CommandOutcome;
use crate::error::CliError;
use crate::generator::{facts_to_csv, FactGenerator};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FactFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    /// Seed for a reproducible table
    #[arg(long)]
    pub seed: Option<u64>,

    /// Attach a hosting attribute to every fact
    #[arg(long)]
    pub hosting: bool,

    #[arg(long, value_enum, default_value_t = FactFormat::Csv)]
    pub format: FactFormat,

    /// Write output here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<CommandOutcome, CliError> {
    let facts = FactGenerator::new(args.seed)
        .with_hosting(args.hosting)
        .generate_presets();

    matrix_core::log_info!("Generated random fact table",
        "facts" => facts.len(),
        "seed" => args.seed.map(|s| s.to_string()).unwrap_or_else(|| "entropy".to_string())
    );

    let rendered = match args.format {
        FactFormat::Csv => facts_to_csv(&facts)?,
        FactFormat::Json => {
            let mut json = serde_json::to_string_pretty(&facts)
                .map_err(matrix_engine::results::ExportError::from)?;
            json.push('\n');
            json
        }
    };
    Ok(CommandOutcome::ok(rendered))
}
