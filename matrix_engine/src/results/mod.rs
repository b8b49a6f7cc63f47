//! # Evaluation Results
//!
//! - [`StatusTable`] - ordered `(region, product, language)` -> outcome map
//! - [`StatusSummary`] - counts per status label and failures
//! - [`MatrixView`] - product and service dashboards for one region
//! - [`EvaluationReport`] - table plus run id and timestamps
//! - [`export`] - JSON and CSV output

pub mod error;
pub mod export;
pub mod report;
pub mod table;
pub mod views;

pub use error::ExportError;
pub use report::EvaluationReport;
pub use table::{CellKey, CellOutcome, CellRecord, StatusSummary, StatusTable};
pub use views::{service_matrix, MatrixRow, MatrixView};
