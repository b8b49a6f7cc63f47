//! # Processor Configuration

use crate::aggregation::EvaluationOptions;
use matrix_core::config::RuntimeConfig;

/// Configuration for the [`MatrixProcessor`](super::MatrixProcessor)
///
/// Controls policy selection and how cells are scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Identifier of the policy to evaluate with
    pub policy_id: String,

    /// Abort on the first failed cell
    pub fail_fast: bool,

    /// Worker threads (0 = detect)
    pub max_threads: usize,

    /// Threshold used by the coverage policy, in percent
    pub coverage_threshold_percent: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::from_runtime(&RuntimeConfig::default())
    }
}

impl ProcessorConfig {
    /// Create a configuration for a specific policy
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            ..Self::default()
        }
    }

    /// Take engine preferences from a loaded runtime configuration
    pub fn from_runtime(runtime: &RuntimeConfig) -> Self {
        let engine = &runtime.engine;
        Self {
            policy_id: engine.default_policy.clone(),
            fail_fast: engine.fail_fast,
            max_threads: engine.max_threads,
            coverage_threshold_percent: engine.coverage_threshold_percent,
        }
    }

    pub fn with_policy(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = policy_id.into();
        self
    }

    /// Enable or disable fail-fast mode (stop on first error)
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = max_threads;
        self
    }

    pub fn with_coverage_threshold(mut self, percent: u32) -> Self {
        self.coverage_threshold_percent = percent;
        self
    }

    pub fn evaluation_options(&self) -> EvaluationOptions {
        EvaluationOptions::new()
            .with_fail_fast(self.fail_fast)
            .with_max_threads(self.max_threads)
    }
}
