//! `matrix policies`

use super::CommandOutcome;
use crate::error::CliError;
use matrix_core::config::RuntimeConfig;
use matrix_engine::policies::create_policy_registry_with_threshold;

pub fn run(runtime: &RuntimeConfig) -> Result<CommandOutcome, CliError> {
    let registry = create_policy_registry_with_threshold(runtime.engine.coverage_threshold_percent)
        .map_err(matrix_engine::ProcessorError::from)?;

    let mut text = String::new();
    for descriptor in registry.descriptors() {
        let marker = if descriptor.policy_id == runtime.engine.default_policy {
            " (default)"
        } else {
            ""
        };
        text.push_str(&format!("{}{}\n", descriptor.policy_id, marker));
        text.push_str(&format!("    {}\n", descriptor.description));
        if descriptor.requires_global_view {
            text.push_str("    needs facts for every region in scope\n");
        }
        let labels: Vec<&str> = descriptor.status_domain.iter().map(|s| s.label).collect();
        text.push_str(&format!("    statuses: {}\n", labels.join(", ")));
    }
    Ok(CommandOutcome::ok(text))
}
