//! Strict escalation: the product is only as available as its worst
//! dependency in the requested region.

use super::traits::{AvailabilityPolicy, DependencyFact};
use matrix_core::{ProductStatus, ServiceStatus, StatusDomain, Tier};

pub const POLICY_ID: &str = "escalation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationStatus {
    FullSupport,
    LimitedSupport,
    NotSupported,
}

impl StatusDomain for EscalationStatus {
    const ALL: &'static [Self] = &[
        EscalationStatus::FullSupport,
        EscalationStatus::LimitedSupport,
        EscalationStatus::NotSupported,
    ];

    fn label(&self) -> &'static str {
        match self {
            EscalationStatus::FullSupport => "Full Support",
            EscalationStatus::LimitedSupport => "Limited Support",
            EscalationStatus::NotSupported => "Not Supported",
        }
    }

    fn tier(&self) -> Tier {
        match self {
            EscalationStatus::FullSupport => Tier::Full,
            EscalationStatus::LimitedSupport => Tier::Limited,
            EscalationStatus::NotSupported => Tier::NotSupported,
        }
    }
}

/// Worst local status across the dependencies. `Full` for an empty slice.
pub(crate) fn worst_local(dependencies: &[DependencyFact]) -> ServiceStatus {
    dependencies
        .iter()
        .map(|d| d.local_status)
        .min()
        .unwrap_or(ServiceStatus::Full)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EscalationPolicy;

impl EscalationPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, dependencies: &[DependencyFact]) -> EscalationStatus {
        match worst_local(dependencies) {
            ServiceStatus::NotSupported => EscalationStatus::NotSupported,
            ServiceStatus::Limited => EscalationStatus::LimitedSupport,
            ServiceStatus::Full => EscalationStatus::FullSupport,
        }
    }
}

impl AvailabilityPolicy for EscalationPolicy {
    fn policy_id(&self) -> &str {
        POLICY_ID
    }

    fn description(&self) -> &str {
        "Worst local dependency wins: any Not Supported gives Not Supported, \
         else any Limited gives Limited Support, else Full Support"
    }

    fn status_domain(&self) -> Vec<ProductStatus> {
        EscalationStatus::ALL
            .iter()
            .map(StatusDomain::to_product_status)
            .collect()
    }

    fn evaluate(&self, dependencies: &[DependencyFact]) -> ProductStatus {
        self.decide(dependencies).to_product_status()
    }
}
