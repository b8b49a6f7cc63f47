//! # Public API
//!
//! High-level processor for callers that want one call from providers to an
//! [`EvaluationReport`](crate::results::EvaluationReport).

pub mod config;
pub mod errors;
pub mod processor;

pub use config::ProcessorConfig;
pub use errors::ProcessorError;
pub use processor::MatrixProcessor;
