//! `matrix evaluate`

use super::{default_threads, non_empty, CommandOutcome, OutputFormat};
use crate::error::CliError;
use crate::presets;
use matrix_core::config::RuntimeConfig;
use matrix_engine::aggregation::EvaluationScope;
use matrix_engine::providers::{
    fact_provider_for_path, CatalogProvider, StaticCatalogProvider, TomlCatalogProvider,
};
use matrix_engine::results::export;
use matrix_engine::{EvaluationReport, MatrixProcessor, ProcessorConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct EvaluateArgs {
    /// Fact file (.json, .csv) or directory of fact files
    #[arg(long)]
    pub facts: PathBuf,

    /// Dependency catalog (TOML); the preset catalog is used when omitted
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Policy identifier (see `matrix policies`)
    #[arg(long)]
    pub policy: Option<String>,

    /// Regions to evaluate; defaults to every region in the facts
    #[arg(long, value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Languages to evaluate; defaults to every language in the facts
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Restrict the run to these catalog products
    #[arg(long, value_delimiter = ',')]
    pub products: Vec<String>,

    /// Stop on the first failed cell
    #[arg(long)]
    pub fail_fast: bool,

    /// Worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    /// Coverage policy threshold in percent
    #[arg(long)]
    pub threshold: Option<u32>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write output here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl EvaluateArgs {
    /// Command-line flags override the runtime configuration
    pub fn processor_config(&self, runtime: &RuntimeConfig) -> ProcessorConfig {
        let mut config = ProcessorConfig::from_runtime(runtime);
        if let Some(policy) = &self.policy {
            config = config.with_policy(policy.clone());
        }
        if self.fail_fast {
            config = config.with_fail_fast(true);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_coverage_threshold(threshold);
        }

        let threads = self.threads.unwrap_or(config.max_threads);
        config.with_max_threads(if threads == 0 {
            default_threads()
        } else {
            threads
        })
    }

    fn catalog_provider(&self) -> Result<Box<dyn CatalogProvider>, CliError> {
        Ok(match &self.catalog {
            Some(path) => Box::new(TomlCatalogProvider::new(path)),
            None => Box::new(StaticCatalogProvider::new(presets::catalog()?)),
        })
    }
}

pub fn run(args: &EvaluateArgs, runtime: &RuntimeConfig) -> Result<CommandOutcome, CliError> {
    let processor = MatrixProcessor::with_config(args.processor_config(runtime))?;
    let facts = fact_provider_for_path(&args.facts)?;
    let catalog_provider = args.catalog_provider()?;
    let (store, catalog) = processor.load(facts.as_ref(), catalog_provider.as_ref())?;

    let regions = non_empty(&args.regions);
    let languages = non_empty(&args.languages);
    let mut scope = EvaluationScope::new(
        if regions.is_empty() {
            store.regions().into_iter().map(|r| r.into_inner()).collect()
        } else {
            regions
        },
        if languages.is_empty() {
            store.languages().into_iter().map(|l| l.into_inner()).collect()
        } else {
            languages
        },
    );
    let products = non_empty(&args.products);
    if !products.is_empty() {
        scope = scope.with_products(products);
    }

    let report = processor.evaluate(&scope, &catalog, &store)?;
    Ok(CommandOutcome {
        rendered: render(&report, args.format)?,
        success: report.is_success(),
    })
}

fn render(report: &EvaluationReport, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => {
            let mut json = report.to_json()?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => export::to_csv(&report.table)?,
        OutputFormat::Table => {
            let mut text = String::new();
            for region in report.table.regions() {
                text.push_str(&report.table.product_matrix(region).render_text());
                text.push('\n');
            }
            for (cell, error) in report.table.failures() {
                text.push_str(&format!("error {}: {}\n", cell, error));
            }
            text.push_str(&format!("{}\n", report));
            text
        }
    })
}
