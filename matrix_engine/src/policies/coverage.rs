//! Coverage percentage: the product degrades with the share of dependencies
//! that are usable locally or through another region.

use super::errors::PolicyError;
use super::fallback::{global_status_domain, GlobalStatus};
use super::traits::{AvailabilityPolicy, DependencyFact};
use matrix_core::config::compile_time::policies::COVERAGE_LIMITED_THRESHOLD_PERCENT;
use matrix_core::{ProductStatus, ServiceStatus, StatusDomain};

pub const POLICY_ID: &str = "coverage";

/// Per-cell dependency tallies the coverage decision is made from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverageCounts {
    pub ga_local: usize,
    pub ga_possible: usize,
    pub available: usize,
    pub total: usize,
}

impl CoverageCounts {
    pub fn tally(dependencies: &[DependencyFact]) -> Self {
        let mut counts = CoverageCounts {
            total: dependencies.len(),
            ..Default::default()
        };

        for dependency in dependencies {
            let local_full = dependency.local_status == ServiceStatus::Full;
            let local_limited = dependency.local_status == ServiceStatus::Limited;
            let full_elsewhere = dependency.full_elsewhere();

            if local_full {
                counts.ga_local += 1;
            }
            if local_full || full_elsewhere {
                counts.ga_possible += 1;
            }
            if local_full || local_limited || full_elsewhere {
                counts.available += 1;
            }
        }

        counts
    }

    /// `available / total >= percent / 100`, without floating point
    pub fn meets_threshold(&self, percent: u32) -> bool {
        self.available * 100 >= percent as usize * self.total
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoveragePolicy {
    threshold_percent: u32,
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        Self {
            threshold_percent: COVERAGE_LIMITED_THRESHOLD_PERCENT,
        }
    }
}

impl CoveragePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom "Limited Availability" threshold (1..=100)
    pub fn with_threshold(threshold_percent: u32) -> Result<Self, PolicyError> {
        if threshold_percent == 0 || threshold_percent > 100 {
            return Err(PolicyError::InvalidParameter {
                policy_id: POLICY_ID.to_string(),
                reason: format!("threshold {}% is outside 1..=100", threshold_percent),
            });
        }
        Ok(Self { threshold_percent })
    }

    pub fn threshold_percent(&self) -> u32 {
        self.threshold_percent
    }

    pub fn decide(&self, dependencies: &[DependencyFact]) -> GlobalStatus {
        let counts = CoverageCounts::tally(dependencies);

        if counts.ga_local == counts.total {
            GlobalStatus::FullInRegion
        } else if counts.ga_possible == counts.total {
            GlobalStatus::FullCrossRegion
        } else if counts.meets_threshold(self.threshold_percent) {
            GlobalStatus::LimitedAvailability
        } else {
            GlobalStatus::NotSupported
        }
    }
}

impl AvailabilityPolicy for CoveragePolicy {
    fn policy_id(&self) -> &str {
        POLICY_ID
    }

    fn description(&self) -> &str {
        "Full when every dependency is GA locally or elsewhere; Limited \
         Availability when enough dependencies are usable; else Not Supported"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::traits::RegionCounts;
    use assert_matches::assert_matches;

    fn dep(status: ServiceStatus, full: usize, limited: usize, not_supported: usize) -> DependencyFact {
        DependencyFact::new(
            "svc",
            status,
            RegionCounts {
                full,
                limited,
                not_supported,
                total: full + limited + not_supported,
            },
        )
    }

    #[test]
    fn test_three_dependency_cross_region_scenario() {
        let deps = [
            dep(ServiceStatus::Full, 3, 0, 0),
            dep(ServiceStatus::Full, 2, 1, 0),
            dep(ServiceStatus::NotSupported, 1, 0, 2),
        ];
        let counts = CoverageCounts::tally(&deps);
        assert_eq!(counts.ga_local, 2);
        assert_eq!(counts.ga_possible, 3);
        assert_eq!(CoveragePolicy::new().decide(&deps), GlobalStatus::FullCrossRegion);
    }

    #[test]
    fn test_exact_seventy_percent_is_limited() {
        // 7 of 10 available, none GA anywhere but locally
        let mut deps = Vec::new();
        for _ in 0..5 {
            deps.push(dep(ServiceStatus::Full, 1, 0, 2));
        }
        for _ in 0..2 {
            deps.push(dep(ServiceStatus::Limited, 0, 1, 2));
        }
        for _ in 0..3 {
            deps.push(dep(ServiceStatus::NotSupported, 0, 1, 2));
        }

        let counts = CoverageCounts::tally(&deps);
        assert_eq!((counts.available, counts.total), (7, 10));
        assert_eq!(
            CoveragePolicy::new().evaluate(&deps).label,
            "Limited Availability"
        );
    }

    #[test]
    fn test_below_threshold_is_not_supported() {
        // 2 of 3 available is 66%
        let deps = [
            dep(ServiceStatus::Full, 1, 0, 1),
            dep(ServiceStatus::Limited, 0, 1, 1),
            dep(ServiceStatus::NotSupported, 0, 0, 2),
        ];
        assert_eq!(CoveragePolicy::new().decide(&deps), GlobalStatus::NotSupported);

        let lenient = CoveragePolicy::with_threshold(60).unwrap();
        assert_eq!(lenient.decide(&deps), GlobalStatus::LimitedAvailability);
    }

    #[test]
    fn test_limited_elsewhere_does_not_count() {
        let deps = [
            dep(ServiceStatus::Full, 1, 0, 0),
            dep(ServiceStatus::NotSupported, 0, 3, 1),
        ];
        let counts = CoverageCounts::tally(&deps);
        assert_eq!(counts.available, 1);
        assert_eq!(CoveragePolicy::new().decide(&deps), GlobalStatus::NotSupported);
    }

    #[test]
    fn test_all_local_ga() {
        let deps = [dep(ServiceStatus::Full, 1, 0, 0), dep(ServiceStatus::Full, 2, 0, 0)];
        assert_eq!(CoveragePolicy::new().decide(&deps), GlobalStatus::FullInRegion);
    }

    #[test]
    fn test_threshold_validation() {
        assert_matches!(
            CoveragePolicy::with_threshold(0),
            Err(PolicyError::InvalidParameter { .. })
        );
        assert_matches!(CoveragePolicy::with_threshold(101), Err(_));
        assert_eq!(CoveragePolicy::with_threshold(100).unwrap().threshold_percent(), 100);
    }
}
