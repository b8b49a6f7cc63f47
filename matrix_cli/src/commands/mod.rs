//! Subcommand implementations
//!
//! Each command renders its output into a [`CommandOutcome`]; `main` decides
//! where it goes and maps the outcome to an exit code.

pub mod evaluate;
pub mod generate;
pub mod policies;
pub mod services;

pub use evaluate::EvaluateArgs;
pub use generate::GenerateArgs;
pub use services::ServicesArgs;

use crate::error::CliError;
use matrix_core::config::compile_time::evaluation::MAX_WORKER_THREADS;
use matrix_core::logging::codes;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Table,
}

/// Rendered command output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub rendered: String,
    /// False when any cell failed
    pub success: bool,
}

impl CommandOutcome {
    pub fn ok(rendered: String) -> Self {
        Self {
            rendered,
            success: true,
        }
    }
}

/// Worker threads when neither the command line nor the config picks one
pub fn default_threads() -> usize {
    num_cpus::get().clamp(1, MAX_WORKER_THREADS)
}

/// Write to `output`, or stdout when absent
pub fn emit(rendered: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|e| CliError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            matrix_core::log_success!(
                codes::success::EXPORT_COMPLETED,
                "Output written",
                "path" => path.display(),
                "bytes" => rendered.len()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| CliError::Io {
                    path: "<stdout>".to_string(),
                    source: e,
                })?;
        }
    }
    Ok(())
}

/// Comma lists from the command line, blanks dropped
pub(crate) fn non_empty(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
