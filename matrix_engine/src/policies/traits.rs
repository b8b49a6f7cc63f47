//! Strategy interface shared by every availability policy

use matrix_core::{Hosting, ProductStatus, Service, ServiceStatus};
use serde::Serialize;

/// How a dependency's status is distributed across the evaluation's regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegionCounts {
    pub full: usize,
    pub limited: usize,
    pub not_supported: usize,
    /// Size of the evaluation's region set, not the number of known facts
    pub total: usize,
}

impl RegionCounts {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, status: ServiceStatus) {
        match status {
            ServiceStatus::Full => self.full += 1,
            ServiceStatus::Limited => self.limited += 1,
            ServiceStatus::NotSupported => self.not_supported += 1,
        }
    }

    pub fn count(&self, status: ServiceStatus) -> usize {
        match status {
            ServiceStatus::Full => self.full,
            ServiceStatus::Limited => self.limited,
            ServiceStatus::NotSupported => self.not_supported,
        }
    }

    /// Regions in the set that have a fact at all
    pub fn known(&self) -> usize {
        self.full + self.limited + self.not_supported
    }

    pub fn is_complete(&self) -> bool {
        self.known() == self.total
    }

    /// Not Supported in every region of the set
    pub fn is_globally_dead(&self) -> bool {
        self.total > 0 && self.not_supported == self.total
    }
}

/// Everything a policy may know about one required service of a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyFact {
    pub service: Service,
    pub local_status: ServiceStatus,
    pub local_hosting: Option<Hosting>,
    pub counts: RegionCounts,
}

impl DependencyFact {
    pub fn new(service: impl Into<Service>, local_status: ServiceStatus, counts: RegionCounts) -> Self {
        Self {
            service: service.into(),
            local_status,
            local_hosting: None,
            counts,
        }
    }

    pub fn with_hosting(mut self, hosting: Hosting) -> Self {
        self.local_hosting = Some(hosting);
        self
    }

    /// Regions other than the local one where the service has `status`
    pub fn count_elsewhere(&self, status: ServiceStatus) -> usize {
        let local = usize::from(self.local_status == status);
        self.counts.count(status).saturating_sub(local)
    }

    pub fn full_elsewhere(&self) -> bool {
        self.count_elsewhere(ServiceStatus::Full) > 0
    }

    /// Full locally and served from another region
    pub fn is_cross_region_hosted(&self) -> bool {
        self.local_status == ServiceStatus::Full
            && self.local_hosting == Some(Hosting::CrossRegion)
    }
}

/// Public description of a registered policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDescriptor {
    pub policy_id: String,
    pub description: String,
    pub status_domain: Vec<ProductStatus>,
    pub requires_global_view: bool,
}

/// A pure mapping from a cell's dependency facts to a composite status.
///
/// Implementations must be deterministic and must not look at anything but
/// `dependencies`.
pub trait AvailabilityPolicy: Send + Sync {
    /// Identifier used to select the policy
    fn policy_id(&self) -> &str;

    fn description(&self) -> &str;

    /// Every status this policy can produce, best first
    fn status_domain(&self) -> Vec<ProductStatus>;

    /// Whether the policy reads the cross-region counts. Such policies need a
    /// fact in every region of the evaluation for each dependency.
    fn requires_global_view(&self) -> bool {
        false
    }

    /// Decide the composite status. `dependencies` is never empty.
    fn evaluate(&self, dependencies: &[DependencyFact]) -> ProductStatus;

    fn descriptor(&self) -> PolicyDescriptor {
        PolicyDescriptor {
            policy_id: self.policy_id().to_string(),
            description: self.description().to_string(),
            status_domain: self.status_domain(),
            requires_global_view: self.requires_global_view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_counts() {
        let mut counts = RegionCounts::new(4);
        counts.record(ServiceStatus::Full);
        counts.record(ServiceStatus::NotSupported);
        counts.record(ServiceStatus::NotSupported);

        assert_eq!(counts.count(ServiceStatus::NotSupported), 2);
        assert_eq!(counts.known(), 3);
        assert!(!counts.is_complete());
        assert!(!counts.is_globally_dead());

        counts.record(ServiceStatus::Limited);
        assert!(counts.is_complete());
    }

    #[test]
    fn test_empty_region_set_is_never_dead() {
        assert!(!RegionCounts::new(0).is_globally_dead());
    }

    #[test]
    fn test_count_elsewhere_excludes_local() {
        let counts = RegionCounts {
            full: 1,
            limited: 0,
            not_supported: 2,
            total: 3,
        };
        let local_full = DependencyFact::new("ASR", ServiceStatus::Full, counts);
        assert!(!local_full.full_elsewhere());

        let local_ns = DependencyFact::new("ASR", ServiceStatus::NotSupported, counts);
        assert!(local_ns.full_elsewhere());
        assert_eq!(local_ns.count_elsewhere(ServiceStatus::NotSupported), 1);
    }

    #[test]
    fn test_cross_region_hosting_only_counts_for_full() {
        let counts = RegionCounts::new(1);
        let limited = DependencyFact::new("LLM", ServiceStatus::Limited, counts)
            .with_hosting(Hosting::CrossRegion);
        assert!(!limited.is_cross_region_hosted());

        let full = DependencyFact::new("LLM", ServiceStatus::Full, counts)
            .with_hosting(Hosting::CrossRegion);
        assert!(full.is_cross_region_hosted());
    }
}
