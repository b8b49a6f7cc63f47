//! # Processor Errors

use crate::aggregation::EvaluationError;
use crate::policies::PolicyError;
use crate::providers::ProviderError;
use crate::results::ExportError;
use matrix_core::config::ConfigError;
use matrix_core::logging::{codes, Code};
use matrix_core::{CatalogError, FactError};

/// Error type for everything the processor does
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Fact error: {0}")]
    Fact(#[from] FactError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl ProcessorError {
    pub fn code(&self) -> Code {
        match self {
            ProcessorError::Provider(e) => e.code(),
            ProcessorError::Evaluation(e) => e.code(),
            ProcessorError::Policy(e) => e.code(),
            ProcessorError::Catalog(e) => e.code(),
            ProcessorError::Fact(e) => e.code(),
            ProcessorError::Config(e) => e.code(),
            ProcessorError::Export(e) => e.code(),
        }
    }

    /// Whether a rerun with complete input data can succeed
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.code().as_str())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ProcessorError::Provider(e) => format!("Could not load input: {}", e),
            ProcessorError::Evaluation(EvaluationError::Catalog(e))
            | ProcessorError::Catalog(e) => e.user_message(),
            ProcessorError::Evaluation(EvaluationError::Policy(e)) | ProcessorError::Policy(e) => {
                e.user_message()
            }
            ProcessorError::Evaluation(e) => format!("Evaluation failed: {}", e),
            ProcessorError::Fact(e) => format!("Invalid facts: {}", e),
            ProcessorError::Config(e) => format!("Configuration error: {}", e),
            ProcessorError::Export(e) => format!("Could not write results: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::CellError;
    use crate::results::CellKey;
    use matrix_core::Product;

    #[test]
    fn test_classification() {
        let missing = ProcessorError::Evaluation(EvaluationError::FailFast {
            cell: CellKey::new("USA".into(), "CRA".into(), "Hindi".into()),
            source: CellError::missing(&"ASR".into(), &"USA".into(), &"Hindi".into()),
        });
        assert_eq!(missing.code(), codes::evaluation::MISSING_DEPENDENCY_DATA);
        assert!(missing.is_recoverable());

        let catalog = ProcessorError::Catalog(CatalogError::UnknownProduct(Product::from("XYZ")));
        assert_eq!(catalog.code(), codes::catalog::UNKNOWN_PRODUCT);
        assert!(!catalog.is_recoverable());
        assert!(catalog.user_message().contains("'XYZ'"));

        let worker = ProcessorError::Evaluation(EvaluationError::WorkerFailed {
            reason: "panic".to_string(),
        });
        assert_eq!(worker.code(), codes::evaluation::WORKER_FAILURE);
        assert!(!worker.is_recoverable());

        let duplicate = ProcessorError::from(ProviderError::Fact(FactError::DuplicateFact {
            key: matrix_core::FactKey::new("USA", "ASR", "English"),
        }));
        assert_eq!(duplicate.code(), codes::facts::DUPLICATE_FACT);
        assert!(!duplicate.is_recoverable());
    }

    #[test]
    fn test_policy_message() {
        let error = ProcessorError::from(PolicyError::InvalidPolicy {
            policy_id: "strict".to_string(),
            available: vec!["coverage".to_string(), "escalation".to_string()],
        });
        assert!(error.user_message().contains("strict"));
    }
}
