//! Provider errors

use matrix_core::logging::{codes, Code};
use matrix_core::{CatalogError, FactError};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{source_name}': {reason}")]
    Json { source_name: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("'{source_name}' is missing required column '{column}'")]
    MissingColumn { source_name: String, column: String },

    #[error("'{source_name}' line {line}: {reason}")]
    InvalidRecord {
        source_name: String,
        line: u64,
        reason: String,
    },

    #[error("No .json or .csv fact files found under '{path}'")]
    NoFactFiles { path: String },

    #[error("Unsupported fact source '{path}' (expected a directory, .json or .csv)")]
    UnsupportedSource { path: String },

    #[error("Fact error: {0}")]
    Fact(#[from] FactError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl ProviderError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ProviderError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn code(&self) -> Code {
        match self {
            ProviderError::Fact(e) => e.code(),
            ProviderError::Catalog(e) => e.code(),
            _ => codes::facts::PROVIDER_FAILURE,
        }
    }
}
