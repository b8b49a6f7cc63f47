//! Global fallback: cross-region availability is inferred from the facts of
//! other regions, and a product is only declared unsupported when a strict
//! majority of its dependencies is Not Supported everywhere.

use super::traits::{AvailabilityPolicy, DependencyFact};
use matrix_core::{Locality, ProductStatus, ServiceStatus, StatusDomain, Tier};

pub const POLICY_ID: &str = "global-fallback";

/// Status domain shared by the policies that reason across regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalStatus {
    FullInRegion,
    FullCrossRegion,
    LimitedAvailability,
    NotSupported,
}

impl StatusDomain for GlobalStatus {
    const ALL: &'static [Self] = &[
        GlobalStatus::FullInRegion,
        GlobalStatus::FullCrossRegion,
        GlobalStatus::LimitedAvailability,
        GlobalStatus::NotSupported,
    ];

    fn label(&self) -> &'static str {
        match self {
            GlobalStatus::FullInRegion => "Full Support (In-Region)",
            GlobalStatus::FullCrossRegion => "Full Support (Cross-Region)",
            GlobalStatus::LimitedAvailability => "Limited Availability",
            GlobalStatus::NotSupported => "Not Supported",
        }
    }

    fn tier(&self) -> Tier {
        match self {
            GlobalStatus::FullInRegion | GlobalStatus::FullCrossRegion => Tier::Full,
            GlobalStatus::LimitedAvailability => Tier::Limited,
            GlobalStatus::NotSupported => Tier::NotSupported,
        }
    }

    fn locality(&self) -> Option<Locality> {
        match self {
            GlobalStatus::FullInRegion => Some(Locality::InRegion),
            GlobalStatus::FullCrossRegion => Some(Locality::CrossRegion),
            _ => None,
        }
    }
}

pub(crate) fn global_status_domain() -> Vec<ProductStatus> {
    GlobalStatus::ALL
        .iter()
        .map(StatusDomain::to_product_status)
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalFallbackPolicy;

impl GlobalFallbackPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, dependencies: &[DependencyFact]) -> GlobalStatus {
        let total = dependencies.len();
        let globally_dead = dependencies
            .iter()
            .filter(|d| d.counts.is_globally_dead())
            .count();

        // Strict majority; exactly half is not enough
        if globally_dead > total / 2 {
            return GlobalStatus::NotSupported;
        }

        let needs_cross_region = dependencies.iter().any(|d| {
            d.local_status == ServiceStatus::NotSupported
                && d.counts.not_supported < d.counts.total
        });
        if needs_cross_region {
            return GlobalStatus::FullCrossRegion;
        }

        let any_local_limited = dependencies
            .iter()
            .any(|d| d.local_status == ServiceStatus::Limited);
        if any_local_limited || globally_dead > 0 {
            return GlobalStatus::LimitedAvailability;
        }

        GlobalStatus::FullInRegion
    }
}

impl AvailabilityPolicy for GlobalFallbackPolicy {
    fn policy_id(&self) -> &str {
        POLICY_ID
    }

    fn description(&self) -> &str {
        "Not Supported only when more than half the dependencies are Not \
         Supported in every region; locally missing services available \
         elsewhere give Full Support (Cross-Region)"
    }

    fn status_domain(&self) -> Vec<ProductStatus> {
        global_status_domain()
    }

    fn requires_global_view(&self) -> bool {
        true
    }

    fn evaluate(&self, dependencies: &[DependencyFact]) -> ProductStatus {
        self.decide(dependencies).to_product_status()
    }
}
