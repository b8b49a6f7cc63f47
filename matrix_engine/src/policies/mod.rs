//! Availability policies
//!
//! Every policy implements [`AvailabilityPolicy`] over the same input: the
//! [`DependencyFact`]s gathered for one cell. Each policy owns its status
//! enumeration and hands the aggregation layer a type-erased
//! [`ProductStatus`](matrix_core::ProductStatus).
//!
//! | id | domain |
//! |---|---|
//! | `escalation` | Full / Limited / Not Supported |
//! | `hosting` | Full (In-Region / Cross-Region) / Limited / Not Supported |
//! | `global-fallback` | Full (In-Region / Cross-Region) / Limited Availability / Not Supported |
//! | `coverage` | same as `global-fallback` |

pub mod coverage;
pub mod errors;
pub mod escalation;
pub mod fallback;
pub mod hosting;
pub mod registry;
pub mod traits;

pub use coverage::{CoverageCounts, CoveragePolicy};
pub use errors::PolicyError;
pub use escalation::{EscalationPolicy, EscalationStatus};
pub use fallback::{GlobalFallbackPolicy, GlobalStatus};
pub use hosting::{HostingPolicy, HostingStatus};
pub use registry::{create_policy_registry, create_policy_registry_with_threshold, PolicyRegistry};
pub use traits::{AvailabilityPolicy, DependencyFact, PolicyDescriptor, RegionCounts};

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_core::{Hosting, ServiceStatus, Tier};
    use proptest::prelude::*;

    fn status_strategy() -> impl Strategy<Value = ServiceStatus> {
        prop_oneof![
            Just(ServiceStatus::Full),
            Just(ServiceStatus::Limited),
            Just(ServiceStatus::NotSupported),
        ]
    }

    fn hosting_strategy() -> impl Strategy<Value = Option<Hosting>> {
        prop_oneof![
            Just(None),
            Just(Some(Hosting::InRegion)),
            Just(Some(Hosting::CrossRegion)),
            Just(Some(Hosting::NotApplicable)),
        ]
    }

    fn build(statuses: &[(ServiceStatus, Option<Hosting>)]) -> Vec<DependencyFact> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, (status, hosting))| {
                let fact = DependencyFact::new(format!("svc-{}", i), *status, RegionCounts::new(1));
                match hosting {
                    Some(h) => fact.with_hosting(*h),
                    None => fact,
                }
            })
            .collect()
    }

    proptest! {
        // Downgrading one dependency never improves the composite tier
        #[test]
        fn local_policies_are_monotonic(
            deps in prop::collection::vec((status_strategy(), hosting_strategy()), 1..8),
            index in any::<prop::sample::Index>(),
        ) {
            let position = index.index(deps.len());
            let mut degraded = deps.clone();
            degraded[position].0 = degraded[position].0.downgraded();

            let before = build(&deps);
            let after = build(&degraded);

            let policies: [&dyn AvailabilityPolicy; 2] = [&EscalationPolicy, &HostingPolicy];
            for policy in policies {
                let tier_before: Tier = policy.evaluate(&before).tier;
                let tier_after: Tier = policy.evaluate(&after).tier;
                prop_assert!(tier_after <= tier_before, "{} improved", policy.policy_id());
            }
        }

        #[test]
        fn every_result_is_in_the_policy_domain(
            deps in prop::collection::vec((status_strategy(), hosting_strategy()), 1..8),
        ) {
            let facts = build(&deps);
            let registry = create_policy_registry();
            for id in registry.list_policy_ids() {
                let policy = registry.get(&id).unwrap();
                let status = policy.evaluate(&facts);
                prop_assert!(policy.status_domain().contains(&status));
            }
        }
    }
}
