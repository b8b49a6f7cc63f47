//! Configuration module for the availability matrix
//!
//! Compile-time limits live in [`constants`]; user preferences loaded from
//! TOML and `MATRIX_*` environment variables live in [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{EnginePreferences, LogLevel, LoggingPreferences, RuntimeConfig};

/// Configuration loading and validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Configuration parse error: {reason}")]
    Parse { reason: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> crate::logging::Code {
        crate::logging::codes::system::CONFIGURATION_ERROR
    }
}

/// Build information
pub mod build_info {
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn profile() -> &'static str {
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    }
}
