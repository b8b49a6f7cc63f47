//! # Matrix Processor
//!
//! Main entry point for turning loaded facts and a catalog into an
//! [`EvaluationReport`] under the configured policy.

use super::config::ProcessorConfig;
use super::errors::ProcessorError;
use crate::aggregation::{self, EvaluationScope};
use crate::policies::{create_policy_registry_with_threshold, AvailabilityPolicy, PolicyRegistry};
use crate::providers::{CatalogProvider, FactProvider};
use crate::results::EvaluationReport;
use matrix_core::{DependencyCatalog, FactStore};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Processor holding a policy registry and run configuration
#[derive(Debug)]
pub struct MatrixProcessor {
    registry: PolicyRegistry,
    config: ProcessorConfig,
}

impl MatrixProcessor {
    /// Create a processor with default configuration
    pub fn new() -> Result<Self, ProcessorError> {
        Self::with_config(ProcessorConfig::default())
    }

    /// Create a processor, failing if the configured policy is unknown
    pub fn with_config(config: ProcessorConfig) -> Result<Self, ProcessorError> {
        let registry = create_policy_registry_with_threshold(config.coverage_threshold_percent)?;
        registry.get(&config.policy_id)?;

        matrix_core::log_debug!("Matrix processor initialized",
            "policy" => &config.policy_id,
            "policies" => registry.len()
        );

        Ok(Self { registry, config })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// The configured policy
    pub fn policy(&self) -> Result<&dyn AvailabilityPolicy, ProcessorError> {
        Ok(self.registry.get(&self.config.policy_id)?)
    }

    /// Evaluate every cell of `scope`
    pub fn evaluate(
        &self,
        scope: &EvaluationScope,
        catalog: &DependencyCatalog,
        store: &FactStore,
    ) -> Result<EvaluationReport, ProcessorError> {
        self.run(scope, catalog, store, None)
    }

    /// Evaluate with a caller-owned cancellation flag
    pub fn evaluate_with_cancel(
        &self,
        scope: &EvaluationScope,
        catalog: &DependencyCatalog,
        store: &FactStore,
        cancel_flag: Arc<AtomicBool>,
    ) -> Result<EvaluationReport, ProcessorError> {
        self.run(scope, catalog, store, Some(cancel_flag))
    }

    /// Load inputs from providers
    pub fn load(
        &self,
        facts: &dyn FactProvider,
        catalog: &dyn CatalogProvider,
    ) -> Result<(FactStore, DependencyCatalog), ProcessorError> {
        let store = facts.load_store().map_err(|e| {
            matrix_core::log_error!(e.code(), "Failed to load availability facts",
                "source" => facts.source_name(),
                "error" => &e
            );
            e
        })?;
        let catalog = catalog.load_catalog().map_err(|e| {
            matrix_core::log_error!(e.code(), "Failed to load dependency catalog",
                "source" => catalog.source_name(),
                "error" => &e
            );
            e
        })?;
        Ok((store, catalog))
    }

    /// Load inputs and evaluate. Without a scope, regions and languages are
    /// taken from the loaded facts.
    pub fn process(
        &self,
        facts: &dyn FactProvider,
        catalog: &dyn CatalogProvider,
        scope: Option<EvaluationScope>,
    ) -> Result<EvaluationReport, ProcessorError> {
        let (store, catalog) = self.load(facts, catalog)?;
        let scope = scope.unwrap_or_else(|| EvaluationScope::from_store(&store));
        self.evaluate(&scope, &catalog, &store)
    }

    fn run(
        &self,
        scope: &EvaluationScope,
        catalog: &DependencyCatalog,
        store: &FactStore,
        cancel_flag: Option<Arc<AtomicBool>>,
    ) -> Result<EvaluationReport, ProcessorError> {
        let policy = self.policy()?;
        let mut options = self.config.evaluation_options();
        if let Some(flag) = cancel_flag {
            options = options.with_cancel_flag(flag);
        }

        let started_at = chrono::Utc::now();
        let table = aggregation::evaluate(scope, catalog, store, policy, &options)?;
        let report = EvaluationReport::new(table, started_at, chrono::Utc::now());

        matrix_core::log_info!("Evaluation report ready",
            "run_id" => &report.run_id,
            "duration_ms" => report.duration_ms
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::EvaluationError;
    use crate::policies::PolicyError;
    use crate::providers::{StaticCatalogProvider, StaticFactProvider};
    use assert_matches::assert_matches;
    use matrix_core::{AvailabilityFact, ServiceStatus};
    use std::sync::atomic::Ordering;

    fn facts() -> Vec<AvailabilityFact> {
        vec![
            AvailabilityFact::new("USA", "ASR", "English", ServiceStatus::Full),
            AvailabilityFact::new("USA", "Redaction", "English", ServiceStatus::Full),
            AvailabilityFact::new("USA", "ASR", "Hindi", ServiceStatus::Full),
        ]
    }

    fn catalog() -> DependencyCatalog {
        DependencyCatalog::builder()
            .product("CRA", ["ASR", "Redaction"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert_matches!(
            MatrixProcessor::with_config(ProcessorConfig::new("strict")),
            Err(ProcessorError::Policy(PolicyError::InvalidPolicy { .. }))
        );
        assert_matches!(
            MatrixProcessor::with_config(ProcessorConfig::new("coverage").with_coverage_threshold(0)),
            Err(ProcessorError::Policy(PolicyError::InvalidParameter { .. }))
        );
    }

    #[test]
    fn test_process_from_providers() {
        let processor = MatrixProcessor::with_config(ProcessorConfig::new("escalation")).unwrap();
        let report = processor
            .process(
                &StaticFactProvider::new(facts()),
                &StaticCatalogProvider::new(catalog()),
                None,
            )
            .unwrap();

        assert_eq!(report.policy_id, "escalation");
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.succeeded, 1);
        assert_eq!(report.summary.failed, 1);
        assert!(!report.is_success());
        assert_eq!(
            report
                .table
                .status_of(&"USA".into(), &"CRA".into(), &"English".into())
                .map(|s| s.label),
            Some("Full Support")
        );
    }

    #[test]
    fn test_fail_fast_propagates() {
        let processor = MatrixProcessor::with_config(
            ProcessorConfig::new("escalation")
                .with_fail_fast(true)
                .with_max_threads(1),
        )
        .unwrap();
        let store = FactStore::from_facts(facts()).unwrap();
        let scope = EvaluationScope::from_store(&store);

        let error = processor.evaluate(&scope, &catalog(), &store).unwrap_err();
        assert_matches!(
            error,
            ProcessorError::Evaluation(EvaluationError::FailFast { .. })
        );
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_cancelled_before_start() {
        let processor = MatrixProcessor::with_config(ProcessorConfig::new("escalation")).unwrap();
        let store = FactStore::from_facts(facts()).unwrap();
        let scope = EvaluationScope::from_store(&store);
        let flag = Arc::new(AtomicBool::new(false));
        flag.store(true, Ordering::Relaxed);

        assert_matches!(
            processor.evaluate_with_cancel(&scope, &catalog(), &store, flag),
            Err(ProcessorError::Evaluation(EvaluationError::Cancelled { completed: 0, .. }))
        );
    }
}
