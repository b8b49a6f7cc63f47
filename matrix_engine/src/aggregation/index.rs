//! Region-count index built once per run

use crate::policies::RegionCounts;
use matrix_core::{FactStore, Language, Region, Service};
use std::collections::{BTreeMap, HashSet};

/// `(service, language)` -> status counts over the run's region set.
///
/// Facts for regions outside the set are ignored.
#[derive(Debug, Clone)]
pub struct StatusIndex {
    counts: BTreeMap<(Service, Language), RegionCounts>,
    total_regions: usize,
}

impl StatusIndex {
    pub fn build<'a, S>(
        store: &FactStore,
        regions: &[Region],
        services: S,
        languages: &[Language],
    ) -> Self
    where
        S: IntoIterator<Item = &'a Service>,
    {
        let region_set: HashSet<&Region> = regions.iter().collect();
        let total_regions = region_set.len();
        let mut counts = BTreeMap::new();

        for service in services {
            for language in languages {
                let key = (service.clone(), language.clone());
                if counts.contains_key(&key) {
                    continue;
                }

                let mut entry = RegionCounts::new(total_regions);
                for fact in store.facts_for(service, language) {
                    if region_set.contains(&fact.region) {
                        entry.record(fact.status);
                    }
                }
                counts.insert(key, entry);
            }
        }

        Self {
            counts,
            total_regions,
        }
    }

    /// Counts for a pair; all zero if the pair was not indexed
    pub fn counts(&self, service: &Service, language: &Language) -> RegionCounts {
        self.counts
            .get(&(service.clone(), language.clone()))
            .copied()
            .unwrap_or_else(|| RegionCounts::new(self.total_regions))
    }

    pub fn total_regions(&self) -> usize {
        self.total_regions
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
