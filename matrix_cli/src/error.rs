//! CLI errors

use matrix_core::config::ConfigError;
use matrix_core::logging::{codes, Code};
use matrix_core::CatalogError;
use matrix_engine::providers::ProviderError;
use matrix_engine::results::ExportError;
use matrix_engine::ProcessorError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}", .0.user_message())]
    Processor(#[from] ProcessorError),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{}", .0.user_message())]
    Catalog(#[from] CatalogError),

    #[error("Cannot write '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl CliError {
    pub fn code(&self) -> Code {
        match self {
            CliError::Processor(e) => e.code(),
            CliError::Provider(e) => e.code(),
            CliError::Export(e) => e.code(),
            CliError::Config(e) => e.code(),
            CliError::Catalog(e) => e.code(),
            CliError::Io { .. } | CliError::Csv(_) => codes::export::EXPORT_FAILURE,
            CliError::InvalidArgument { .. } => codes::system::CONFIGURATION_ERROR,
        }
    }

    /// Whether rerunning with complete fact data can succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::Processor(e) => e.is_recoverable(),
            other => codes::is_recoverable(other.code().as_str()),
        }
    }

    /// Process exit status: 1 for incomplete data, 2 for everything else
    pub fn exit_code(&self) -> i32 {
        if self.is_recoverable() {
            1
        } else {
            2
        }
    }
}
