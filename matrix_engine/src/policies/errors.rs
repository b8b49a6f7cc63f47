//! Policy registry errors

use matrix_core::logging::{codes, Code};

/// Policy selection and registration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Unknown policy '{policy_id}' (available: {})", .available.join(", "))]
    InvalidPolicy {
        policy_id: String,
        available: Vec<String>,
    },

    #[error("Policy '{policy_id}' is already registered")]
    DuplicatePolicy { policy_id: String },

    #[error("Invalid parameter for policy '{policy_id}': {reason}")]
    InvalidParameter { policy_id: String, reason: String },
}

impl PolicyError {
    pub fn code(&self) -> Code {
        codes::evaluation::INVALID_POLICY
    }

    pub fn user_message(&self) -> String {
        match self {
            PolicyError::InvalidPolicy {
                policy_id,
                available,
            } => format!(
                "'{}' is not a known policy. Choose one of: {}",
                policy_id,
                available.join(", ")
            ),
            other => other.to_string(),
        }
    }
}
