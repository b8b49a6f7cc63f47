//! Random fact tables for demos and load tests
//!
//! Statuses are drawn with weights 40/30/30 (Full/Limited/Not Supported).

use crate::error::CliError;
use crate::presets;
use matrix_core::{AvailabilityFact, Hosting, ServiceStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FULL_WEIGHT: u32 = 40;
const LIMITED_WEIGHT: u32 = 30;
const NOT_SUPPORTED_WEIGHT: u32 = 30;

/// Share of available services served from another region, in percent
const CROSS_REGION_PERCENT: u32 = 25;

pub struct FactGenerator {
    rng: StdRng,
    with_hosting: bool,
}

impl FactGenerator {
    /// Seeded generators are reproducible; without a seed entropy is used
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            with_hosting: false,
        }
    }

    /// Attach a hosting attribute to every fact
    pub fn with_hosting(mut self, with_hosting: bool) -> Self {
        self.with_hosting = with_hosting;
        self
    }

    fn next_status(&mut self) -> ServiceStatus {
        let roll = self
            .rng
            .gen_range(0..FULL_WEIGHT + LIMITED_WEIGHT + NOT_SUPPORTED_WEIGHT);
        if roll < FULL_WEIGHT {
            ServiceStatus::Full
        } else if roll < FULL_WEIGHT + LIMITED_WEIGHT {
            ServiceStatus::Limited
        } else {
            ServiceStatus::NotSupported
        }
    }

    fn next_hosting(&mut self, status: ServiceStatus) -> Hosting {
        if status == ServiceStatus::NotSupported {
            Hosting::NotApplicable
        } else if self.rng.gen_range(0..100) < CROSS_REGION_PERCENT {
            Hosting::CrossRegion
        } else {
            Hosting::InRegion
        }
    }

    /// One fact for every (region, service, language)
    pub fn generate(
        &mut self,
        regions: &[&str],
        services: &[&str],
        languages: &[&str],
    ) -> Vec<AvailabilityFact> {
        let mut facts = Vec::with_capacity(regions.len() * services.len() * languages.len());

        for region in regions {
            for service in services {
                for language in languages {
                    let status = self.next_status();
                    let mut fact = AvailabilityFact::new(*region, *service, *language, status);
                    if self.with_hosting {
                        fact = fact.with_hosting(self.next_hosting(status));
                    }
                    facts.push(fact);
                }
            }
        }

        facts
    }

    /// Full table over the preset identifiers
    pub fn generate_presets(&mut self) -> Vec<AvailabilityFact> {
        self.generate(&presets::REGIONS, &presets::SERVICES, &presets::LANGUAGES)
    }
}

/// CSV sheet with a trailing lookup key column
pub fn facts_to_csv(facts: &[AvailabilityFact]) -> Result<String, CliError> {
    let with_hosting = facts.iter().any(|f| f.hosting.is_some());
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Region", "Service", "Language", "Status"];
    if with_hosting {
        header.push("Hosting");
    }
    header.push("Lookup_Key");
    writer.write_record(&header)?;

    for fact in facts {
        let mut row = vec![
            fact.region.to_string(),
            fact.service.to_string(),
            fact.language.to_string(),
            fact.status.to_string(),
        ];
        if with_hosting {
            row.push(fact.hosting.map(|h| h.to_string()).unwrap_or_default());
        }
        row.push(fact.key().lookup_key());
        writer.write_record(&row)?;
    }

    writer.flush().map_err(|e| CliError::Io {
        path: "<buffer>".to_string(),
        source: e,
    })?;
    let buffer = writer.into_inner().map_err(|e| CliError::Io {
        path: "<buffer>".to_string(),
        source: std::io::Error::new(e.error().kind(), e.error().to_string()),
    })?;
    String::from_utf8(buffer).map_err(|e| CliError::InvalidArgument {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_engine::providers::parse_csv_facts;
    use std::collections::HashSet;

    #[test]
    fn test_full_factorial() {
        let facts = FactGenerator::new(Some(7)).generate_presets();
        assert_eq!(facts.len(), 5 * 10 * 7);

        let keys: HashSet<_> = facts.iter().map(|f| f.key()).collect();
        assert_eq!(keys.len(), facts.len());
        assert!(facts.iter().all(|f| f.hosting.is_none()));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = FactGenerator::new(Some(42)).generate_presets();
        let b = FactGenerator::new(Some(42)).generate_presets();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weights_roughly_hold() {
        let facts = FactGenerator::new(Some(1)).generate(
            &["R1", "R2", "R3", "R4"],
            &["S1", "S2", "S3", "S4", "S5"],
            &["L1", "L2", "L3", "L4", "L5"],
        );
        let full = facts.iter().filter(|f| f.status == ServiceStatus::Full).count();
        // 100 draws at 40%; a seeded run stays far from both ends
        assert!(full > 15 && full < 65, "full = {}", full);
    }

    #[test]
    fn test_hosting_follows_status() {
        let facts = FactGenerator::new(Some(3))
            .with_hosting(true)
            .generate_presets();
        for fact in &facts {
            match fact.status {
                ServiceStatus::NotSupported => assert_eq!(fact.hosting, Some(Hosting::NotApplicable)),
                _ => assert_ne!(fact.hosting, Some(Hosting::NotApplicable)),
            }
        }
    }

    #[test]
    fn test_csv_reads_back() {
        let facts = FactGenerator::new(Some(9))
            .with_hosting(true)
            .generate(&["USA"], &["ASR", "LLM"], &["English"]);
        let csv = facts_to_csv(&facts).unwrap();
        assert!(csv.starts_with("Region,Service,Language,Status,Hosting,Lookup_Key"));
        assert!(csv.contains("USA|ASR|English"));

        assert_eq!(parse_csv_facts(&csv, "generated").unwrap(), facts);
    }
}
