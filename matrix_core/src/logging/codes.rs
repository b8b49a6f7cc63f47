//! Event codes and their metadata
//!
//! Single source of truth for the codes attached to log events.

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    /// Whether the run can continue past this error
    pub recoverable: bool,
    pub description: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const CONFIGURATION_ERROR: Code = Code::new("ERR001");
}

/// Fact loading and lookup codes
pub mod facts {
    use super::Code;

    pub const FACT_NOT_FOUND: Code = Code::new("E010");
    pub const DUPLICATE_FACT: Code = Code::new("E011");
    pub const INVALID_IDENTIFIER: Code = Code::new("E012");
    pub const PROVIDER_FAILURE: Code = Code::new("E013");
}

/// Dependency catalog codes
pub mod catalog {
    use super::Code;

    pub const UNKNOWN_PRODUCT: Code = Code::new("E020");
    pub const UNKNOWN_SERVICE: Code = Code::new("E021");
    pub const INVALID_CATALOG: Code = Code::new("E022");
}

/// Evaluation codes
pub mod evaluation {
    use super::Code;

    pub const MISSING_DEPENDENCY_DATA: Code = Code::new("E030");
    pub const INVALID_POLICY: Code = Code::new("E031");
    pub const EVALUATION_STOPPED: Code = Code::new("E032");
    pub const WORKER_FAILURE: Code = Code::new("E033");
}

/// Result export codes
pub mod export {
    use super::Code;

    pub const EXPORT_FAILURE: Code = Code::new("E040");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("S001");
    pub const FACTS_LOADED: Code = Code::new("S010");
    pub const CATALOG_LOADED: Code = Code::new("S020");
    pub const EVALUATION_COMPLETED: Code = Code::new("S030");
    pub const EXPORT_COMPLETED: Code = Code::new("S040");
}

// ============================================================================
// METADATA LOOKUP
// ============================================================================

const ERROR_METADATA: &[ErrorMetadata] = &[
    ErrorMetadata {
        code: "ERR001",
        category: "system",
        severity: Severity::High,
        recoverable: false,
        description: "Invalid configuration",
    },
    ErrorMetadata {
        code: "E010",
        category: "facts",
        severity: Severity::Medium,
        recoverable: true,
        description: "Availability fact not found",
    },
    ErrorMetadata {
        code: "E011",
        category: "facts",
        severity: Severity::High,
        recoverable: false,
        description: "Duplicate availability fact",
    },
    ErrorMetadata {
        code: "E012",
        category: "facts",
        severity: Severity::High,
        recoverable: false,
        description: "Invalid identifier",
    },
    ErrorMetadata {
        code: "E013",
        category: "facts",
        severity: Severity::High,
        recoverable: false,
        description: "Fact provider failure",
    },
    ErrorMetadata {
        code: "E020",
        category: "catalog",
        severity: Severity::High,
        recoverable: false,
        description: "Unknown product",
    },
    ErrorMetadata {
        code: "E021",
        category: "catalog",
        severity: Severity::High,
        recoverable: false,
        description: "Unknown service",
    },
    ErrorMetadata {
        code: "E022",
        category: "catalog",
        severity: Severity::High,
        recoverable: false,
        description: "Invalid catalog",
    },
    ErrorMetadata {
        code: "E030",
        category: "evaluation",
        severity: Severity::Medium,
        recoverable: true,
        description: "Missing dependency data",
    },
    ErrorMetadata {
        code: "E031",
        category: "evaluation",
        severity: Severity::High,
        recoverable: false,
        description: "Invalid policy",
    },
    ErrorMetadata {
        code: "E032",
        category: "evaluation",
        severity: Severity::High,
        recoverable: true,
        description: "Evaluation stopped before every cell was evaluated",
    },
    ErrorMetadata {
        code: "E033",
        category: "evaluation",
        severity: Severity::Critical,
        recoverable: false,
        description: "Evaluation worker failed",
    },
    ErrorMetadata {
        code: "E040",
        category: "export",
        severity: Severity::Medium,
        recoverable: false,
        description: "Result export failed",
    },
];

/// Look up metadata for an error code
pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    ERROR_METADATA.iter().find(|m| m.code == code)
}

pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map(|m| m.recoverable).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::CONFIGURATION_ERROR,
            facts::FACT_NOT_FOUND,
            facts::DUPLICATE_FACT,
            facts::INVALID_IDENTIFIER,
            facts::PROVIDER_FAILURE,
            catalog::UNKNOWN_PRODUCT,
            catalog::UNKNOWN_SERVICE,
            catalog::INVALID_CATALOG,
            evaluation::MISSING_DEPENDENCY_DATA,
            evaluation::INVALID_POLICY,
            evaluation::EVALUATION_STOPPED,
            evaluation::WORKER_FAILURE,
            export::EXPORT_FAILURE,
        ];
        for code in codes {
            assert!(get_metadata(code.as_str()).is_some(), "{}", code);
        }
    }

    #[test]
    fn test_classification() {
        assert!(is_recoverable("E030"));
        assert!(is_recoverable("E032"));
        assert!(!is_recoverable("E031"));
        assert!(!is_recoverable("E999"));
        assert_eq!(
            get_metadata("E033").map(|m| m.severity),
            Some(Severity::Critical)
        );
        assert!(get_metadata("S010").is_none());
    }
}
