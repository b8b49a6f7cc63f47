//! Cell-level and run-level evaluation errors

use crate::policies::PolicyError;
use crate::results::CellKey;
use matrix_core::logging::{codes, Code};
use matrix_core::{CatalogError, Language, Region, Service};

/// Error confined to a single (region, product, language) cell
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    /// A required service has no fact for the region. Never read as
    /// "Not Supported".
    #[error("Missing availability data for service '{service}' in region '{region}' (language '{language}')")]
    MissingDependencyData {
        service: Service,
        region: Region,
        language: Language,
    },
}

impl CellError {
    pub fn missing(service: &Service, region: &Region, language: &Language) -> Self {
        CellError::MissingDependencyData {
            service: service.clone(),
            region: region.clone(),
            language: language.clone(),
        }
    }

    pub fn code(&self) -> Code {
        match self {
            CellError::MissingDependencyData { .. } => codes::evaluation::MISSING_DEPENDENCY_DATA,
        }
    }
}

/// Errors that abort a whole evaluation run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Evaluation aborted at cell {cell}: {source}")]
    FailFast { cell: CellKey, source: CellError },

    #[error("Evaluation cancelled after {completed} of {total} cells")]
    Cancelled { completed: usize, total: usize },

    #[error("Evaluation worker failed: {reason}")]
    WorkerFailed { reason: String },
}

impl EvaluationError {
    pub fn code(&self) -> Code {
        match self {
            EvaluationError::Catalog(e) => e.code(),
            EvaluationError::Policy(e) => e.code(),
            EvaluationError::FailFast { source, .. } => source.code(),
            EvaluationError::Cancelled { .. } => codes::evaluation::EVALUATION_STOPPED,
            EvaluationError::WorkerFailed { .. } => codes::evaluation::WORKER_FAILURE,
        }
    }
}
