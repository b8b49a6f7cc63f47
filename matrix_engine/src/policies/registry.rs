//! Policy registry
//!
//! Policies are registered once by identifier and looked up per run.

use super::coverage::CoveragePolicy;
use super::errors::PolicyError;
use super::escalation::EscalationPolicy;
use super::fallback::GlobalFallbackPolicy;
use super::hosting::HostingPolicy;
use super::traits::{AvailabilityPolicy, PolicyDescriptor};
use std::collections::BTreeMap;

/// Registry of selectable availability policies
#[derive(Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<String, Box<dyn AvailabilityPolicy>>,
}

impl PolicyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, policy: Box<dyn AvailabilityPolicy>) -> Result<(), PolicyError> {
        let policy_id = policy.policy_id().to_string();

        if self.policies.contains_key(&policy_id) {
            return Err(PolicyError::DuplicatePolicy { policy_id });
        }

        log::debug!("Registered availability policy '{}'", policy_id);
        self.policies.insert(policy_id, policy);
        Ok(())
    }

    /// Look up a policy by identifier
    pub fn get(&self, policy_id: &str) -> Result<&dyn AvailabilityPolicy, PolicyError> {
        self.policies
            .get(policy_id)
            .map(|p| p.as_ref())
            .ok_or_else(|| PolicyError::InvalidPolicy {
                policy_id: policy_id.to_string(),
                available: self.list_policy_ids(),
            })
    }

    pub fn has_policy(&self, policy_id: &str) -> bool {
        self.policies.contains_key(policy_id)
    }

    /// Registered identifiers, sorted
    pub fn list_policy_ids(&self) -> Vec<String> {
        self.policies.keys().cloned().collect()
    }

    pub fn descriptors(&self) -> Vec<PolicyDescriptor> {
        self.policies.values().map(|p| p.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl std::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyRegistry")
            .field("policies", &self.list_policy_ids())
            .finish()
    }
}

/// Registry with the four built-in policies and the default coverage
/// threshold
pub fn create_policy_registry() -> PolicyRegistry {
    let mut registry = PolicyRegistry::new();
    register_builtins(&mut registry, CoveragePolicy::new());
    registry
}

/// Registry with the built-in policies and a custom coverage threshold
pub fn create_policy_registry_with_threshold(
    coverage_threshold_percent: u32,
) -> Result<PolicyRegistry, PolicyError> {
    let coverage = CoveragePolicy::with_threshold(coverage_threshold_percent)?;
    let mut registry = PolicyRegistry::new();
    register_builtins(&mut registry, coverage);
    Ok(registry)
}

fn register_builtins(registry: &mut PolicyRegistry, coverage: CoveragePolicy) {
    let builtins: Vec<Box<dyn AvailabilityPolicy>> = vec![
        Box::new(EscalationPolicy::new()),
        Box::new(HostingPolicy::new()),
        Box::new(GlobalFallbackPolicy::new()),
        Box::new(coverage),
    ];

    for policy in builtins {
        // Built-in identifiers are distinct constants
        if let Err(e) = registry.register(policy) {
            log::error!("Failed to register built-in policy: {}", e);
        }
    }
}
