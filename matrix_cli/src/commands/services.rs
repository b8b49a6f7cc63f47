//! `matrix services`: the per-region service dashboard

use super::{non_empty, CommandOutcome};
use crate::error::CliError;
use matrix_core::{Language, Region, Service, Vocabulary};
use matrix_engine::providers::fact_provider_for_path;
use matrix_engine::results::service_matrix;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum VocabularyArg {
    /// Full Support / Limited Support / Not Supported
    Support,
    /// General Availability / Limited Availability / Not Supported
    Availability,
}

impl From<VocabularyArg> for Vocabulary {
    fn from(value: VocabularyArg) -> Self {
        match value {
            VocabularyArg::Support => Vocabulary::Support,
            VocabularyArg::Availability => Vocabulary::Availability,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServicesArgs {
    /// Fact file (.json, .csv) or directory of fact files
    #[arg(long)]
    pub facts: PathBuf,

    #[arg(long)]
    pub region: String,

    /// Service columns; defaults to every service in the facts
    #[arg(long, value_delimiter = ',')]
    pub services: Vec<String>,

    /// Language rows; defaults to every language in the facts
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    #[arg(long, value_enum, default_value_t = VocabularyArg::Support)]
    pub vocabulary: VocabularyArg,

    /// Write output here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ServicesArgs) -> Result<CommandOutcome, CliError> {
    let store = fact_provider_for_path(&args.facts)?.load_store()?;
    let region = Region::from(args.region.trim());
    if !store.regions().contains(&region) {
        return Err(CliError::InvalidArgument {
            reason: format!("no facts for region '{}'", region),
        });
    }

    let services: Vec<Service> = match non_empty(&args.services) {
        selected if selected.is_empty() => store.services().into_iter().collect(),
        selected => selected.into_iter().map(Service::from).collect(),
    };
    let languages: Vec<Language> = match non_empty(&args.languages) {
        selected if selected.is_empty() => store.languages().into_iter().collect(),
        selected => selected.into_iter().map(Language::from).collect(),
    };

    let view = service_matrix(&store, &region, &services, &languages, args.vocabulary.into());
    Ok(CommandOutcome::ok(view.render_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn write_facts(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("facts.csv");
        std::fs::write(
            &path,
            "Region,Service,Language,Status,Hosting\n\
             UAE,ASR,Arabic,Full Support,Cross-Region\n\
             UAE,LLM,Arabic,Limited Support,\n\
             UAE,ASR,English,Not Supported,N/A\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_service_view() {
        let dir = tempfile::tempdir().unwrap();
        let args = ServicesArgs {
            facts: write_facts(dir.path()),
            region: "UAE".to_string(),
            services: vec![],
            languages: vec![],
            vocabulary: VocabularyArg::Availability,
            output: None,
        };

        let rendered = run(&args).unwrap().rendered;
        assert!(rendered.contains("General Availability (Cross-Region)"));
        assert!(rendered.contains("Limited Availability"));
        assert!(!rendered.contains("(N/A)"));
    }

    #[test]
    fn test_unknown_region() {
        let dir = tempfile::tempdir().unwrap();
        let args = ServicesArgs {
            facts: write_facts(dir.path()),
            region: "Mars".to_string(),
            services: vec![],
            languages: vec![],
            vocabulary: VocabularyArg::Support,
            output: None,
        };
        assert_matches!(run(&args), Err(CliError::InvalidArgument { .. }));
    }
}
