//! Shared gathering step: turns a cell's required services into the
//! per-dependency facts every policy reads.

use super::errors::CellError;
use super::index::StatusIndex;
use crate::policies::DependencyFact;
use matrix_core::{FactStore, Language, Region, Service};

/// Collect the dependency facts for one cell.
///
/// A missing local fact fails the cell. With `global_view`, a dependency must
/// also have a fact in every region of the set; the error then names the
/// first region (in set order) without one.
pub fn gather_dependencies(
    store: &FactStore,
    index: &StatusIndex,
    regions: &[Region],
    region: &Region,
    language: &Language,
    services: &[Service],
    global_view: bool,
) -> Result<Vec<DependencyFact>, CellError> {
    let mut dependencies = Vec::with_capacity(services.len());

    for service in services {
        let local = store
            .get(region, service, language)
            .map_err(|_| CellError::missing(service, region, language))?;

        let counts = index.counts(service, language);
        if global_view && !counts.is_complete() {
            let missing = regions
                .iter()
                .find(|r| store.get(r, service, language).is_err())
                .unwrap_or(region);
            return Err(CellError::missing(service, missing, language));
        }

        dependencies.push(DependencyFact {
            service: service.clone(),
            local_status: local.status,
            local_hosting: local.hosting,
            counts,
        });
    }

    Ok(dependencies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use matrix_core::{AvailabilityFact, Hosting, ServiceStatus};

    fn fixture() -> (FactStore, Vec<Region>, Vec<Language>) {
        let store = FactStore::from_facts(vec![
            AvailabilityFact::new("USA", "ASR", "English", ServiceStatus::Full)
                .with_hosting(Hosting::CrossRegion),
            AvailabilityFact::new("UAE", "ASR", "English", ServiceStatus::Limited),
            AvailabilityFact::new("USA", "LLM", "English", ServiceStatus::Full),
        ])
        .unwrap();
        let regions = vec![Region::from("USA"), Region::from("UAE")];
        let languages = vec![Language::from("English")];
        (store, regions, languages)
    }

    #[test]
    fn test_local_gather() {
        let (store, regions, languages) = fixture();
        let services = vec![Service::from("ASR"), Service::from("LLM")];
        let index = StatusIndex::build(&store, &regions, &services, &languages);

        let deps = gather_dependencies(
            &store,
            &index,
            &regions,
            &regions[0],
            &languages[0],
            &services,
            false,
        )
        .unwrap();

        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].local_hosting, Some(Hosting::CrossRegion));
        assert_eq!(deps[0].counts.limited, 1);
        assert_eq!(deps[1].counts.known(), 1);
    }

    #[test]
    fn test_global_view_requires_every_region() {
        let (store, regions, languages) = fixture();
        let services = vec![Service::from("ASR"), Service::from("LLM")];
        let index = StatusIndex::build(&store, &regions, &services, &languages);

        let result = gather_dependencies(
            &store,
            &index,
            &regions,
            &regions[0],
            &languages[0],
            &services,
            true,
        );
        assert_matches!(result, Err(CellError::MissingDependencyData { service, region, .. })
            if service.as_str() == "LLM" && region.as_str() == "UAE");
    }

    #[test]
    fn test_missing_local_fact() {
        let (store, regions, languages) = fixture();
        let services = vec![Service::from("LLM")];
        let index = StatusIndex::build(&store, &regions, &services, &languages);

        let result = gather_dependencies(
            &store,
            &index,
            &regions,
            &regions[1],
            &languages[0],
            &services,
            false,
        );
        assert_eq!(
            result,
            Err(CellError::missing(&services[0], &regions[1], &languages[0]))
        );
    }
}
