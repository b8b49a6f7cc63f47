//! # Fact Store
//!
//! Read-only table of availability facts keyed by (region, service, language).
//! Facts are grouped by (service, language) so that the cross-region queries
//! used by global policies touch only one group.

use crate::config::compile_time::identifiers::MAX_IDENTIFIER_LENGTH;
use crate::error::FactError;
use crate::types::{
    AvailabilityFact, FactKey, Language, Region, Service, ServiceStatus, LOOKUP_KEY_SEPARATOR,
};
use std::collections::{BTreeMap, BTreeSet};

type RegionFacts = BTreeMap<Region, AvailabilityFact>;

/// Immutable store of availability facts
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    groups: BTreeMap<(Service, Language), RegionFacts>,
    fact_count: usize,
}

impl FactStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store, rejecting a second fact for an existing triple
    pub fn from_facts<I>(facts: I) -> Result<Self, FactError>
    where
        I: IntoIterator<Item = AvailabilityFact>,
    {
        let mut store = Self::new();
        for fact in facts {
            store.insert(fact)?;
        }
        Ok(store)
    }

    fn insert(&mut self, fact: AvailabilityFact) -> Result<(), FactError> {
        let group = self
            .groups
            .entry((fact.service.clone(), fact.language.clone()))
            .or_default();

        if group.contains_key(&fact.region) {
            return Err(FactError::DuplicateFact { key: fact.key() });
        }

        group.insert(fact.region.clone(), fact);
        self.fact_count += 1;
        Ok(())
    }

    /// Look up the fact for a triple
    pub fn get(
        &self,
        region: &Region,
        service: &Service,
        language: &Language,
    ) -> Result<&AvailabilityFact, FactError> {
        self.group(service, language)
            .and_then(|group| group.get(region))
            .ok_or_else(|| FactError::not_found(FactKey::new(
                region.clone(),
                service.clone(),
                language.clone(),
            )))
    }

    /// Number of regions where `service` has `status` for `language`
    pub fn count_where(
        &self,
        service: &Service,
        language: &Language,
        status: ServiceStatus,
    ) -> usize {
        self.group(service, language)
            .map(|group| group.values().filter(|f| f.status == status).count())
            .unwrap_or(0)
    }

    /// True if any region other than `region` has `service` at `target` for
    /// `language`
    pub fn exists_elsewhere(
        &self,
        region: &Region,
        service: &Service,
        language: &Language,
        target: ServiceStatus,
    ) -> bool {
        self.group(service, language)
            .map(|group| {
                group
                    .iter()
                    .any(|(other, fact)| other != region && fact.status == target)
            })
            .unwrap_or(false)
    }

    /// All facts for one (service, language), keyed by region
    pub fn facts_for(
        &self,
        service: &Service,
        language: &Language,
    ) -> impl Iterator<Item = &AvailabilityFact> {
        self.group(service, language)
            .into_iter()
            .flat_map(|group| group.values())
    }

    fn group(&self, service: &Service, language: &Language) -> Option<&RegionFacts> {
        self.groups.get(&(service.clone(), language.clone()))
    }

    /// Iterate all facts in (service, language, region) order
    pub fn iter(&self) -> impl Iterator<Item = &AvailabilityFact> {
        self.groups.values().flat_map(|group| group.values())
    }

    pub fn regions(&self) -> BTreeSet<Region> {
        self.iter().map(|f| f.region.clone()).collect()
    }

    pub fn services(&self) -> BTreeSet<Service> {
        self.groups.keys().map(|(s, _)| s.clone()).collect()
    }

    pub fn languages(&self) -> BTreeSet<Language> {
        self.groups.keys().map(|(_, l)| l.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.fact_count
    }

    pub fn is_empty(&self) -> bool {
        self.fact_count == 0
    }
}

/// Check that an identifier is usable as part of a lookup key
pub fn validate_identifier(value: &str) -> Result<(), FactError> {
    let reason = if value.trim().is_empty() {
        Some("must not be empty".to_string())
    } else if value.trim() != value {
        Some("must not have leading or trailing whitespace".to_string())
    } else if value.len() > MAX_IDENTIFIER_LENGTH {
        Some(format!("longer than {} bytes", MAX_IDENTIFIER_LENGTH))
    } else if value.contains(LOOKUP_KEY_SEPARATOR) {
        Some(format!("contains the key separator '{}'", LOOKUP_KEY_SEPARATOR))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(FactError::InvalidIdentifier {
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Validate the identifiers of a fact loaded from an external source
pub fn validate_fact(fact: &AvailabilityFact) -> Result<(), FactError> {
    validate_identifier(fact.region.as_str())?;
    validate_identifier(fact.service.as_str())?;
    validate_identifier(fact.language.as_str())
}
