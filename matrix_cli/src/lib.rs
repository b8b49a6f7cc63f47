//! # Availability Matrix CLI
//!
//! Library half of the `matrix` binary: preset identifiers of the reference
//! deployment, a random fact generator and the subcommands.

pub mod commands;
pub mod error;
pub mod generator;
pub mod presets;

pub use error::CliError;
