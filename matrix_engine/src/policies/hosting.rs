//! Hosting-aware escalation: like strict escalation, but a fully supported
//! product is split by where its dependencies are served from.

use super::escalation::worst_local;
use super::traits::{AvailabilityPolicy, DependencyFact};
use matrix_core::{Locality, ProductStatus, ServiceStatus, StatusDomain, Tier};

pub const POLICY_ID: &str = "hosting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostingStatus {
    FullInRegion,
    FullCrossRegion,
    LimitedSupport,
    NotSupported,
}

impl StatusDomain for HostingStatus {
    const ALL: &'static [Self] = &[
        HostingStatus::FullInRegion,
        HostingStatus::FullCrossRegion,
        HostingStatus::LimitedSupport,
        HostingStatus::NotSupported,
    ];

    fn label(&self) -> &'static str {
        match self {
            HostingStatus::FullInRegion => "Full Support (In-Region)",
            HostingStatus::FullCrossRegion => "Full Support (Cross-Region)",
            HostingStatus::LimitedSupport => "Limited Support",
            HostingStatus::NotSupported => "Not Supported",
        }
    }

    fn tier(&self) -> Tier {
        match self {
            HostingStatus::FullInRegion | HostingStatus::FullCrossRegion => Tier::Full,
            HostingStatus::LimitedSupport => Tier::Limited,
            HostingStatus::NotSupported => Tier::NotSupported,
        }
    }

    fn locality(&self) -> Option<Locality> {
        match self {
            HostingStatus::FullInRegion => Some(Locality::InRegion),
            HostingStatus::FullCrossRegion => Some(Locality::CrossRegion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostingPolicy;

impl HostingPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, dependencies: &[DependencyFact]) -> HostingStatus {
        match worst_local(dependencies) {
            ServiceStatus::NotSupported => HostingStatus::NotSupported,
            ServiceStatus::Limited => HostingStatus::LimitedSupport,
            // Missing or N/A hosting on a Full dependency counts as in-region
            ServiceStatus::Full => {
                if dependencies.iter().any(DependencyFact::is_cross_region_hosted) {
                    HostingStatus::FullCrossRegion
                } else {
                    HostingStatus::FullInRegion
                }
            }
        }
    }
}

impl AvailabilityPolicy for HostingPolicy {
    fn policy_id(&self) -> &str {
        POLICY_ID
    }

    fn description(&self) -> &str {
        "Strict escalation; when every dependency is Full, any cross-region \
         hosted dependency makes the product Full Support (Cross-Region)"
    }

    fn status_domain(&self) -> Vec<ProductStatus> {
        HostingStatus::ALL
            .iter()
            .map(StatusDomain::to_product_status)
            .collect()
    }

    fn evaluate(&self, dependencies: &[DependencyFact]) -> ProductStatus {
        self.decide(dependencies).to_product_status()
    }
}
