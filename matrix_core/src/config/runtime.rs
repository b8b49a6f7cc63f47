// RUNTIME PREFERENCES (User Experience)

use super::compile_time::evaluation::MAX_WORKER_THREADS;
use super::compile_time::policies::{COVERAGE_LIMITED_THRESHOLD_PERCENT, DEFAULT_POLICY_ID};
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePreferences {
    /// Policy identifier used when the caller does not pick one
    pub default_policy: String,

    /// Abort the whole run on the first cell error
    pub fail_fast: bool,

    /// Worker threads for cell evaluation (0 = detect)
    pub max_threads: usize,

    /// Coverage policy threshold for "Limited Availability", in percent
    pub coverage_threshold_percent: u32,
}

impl Default for EnginePreferences {
    fn default() -> Self {
        Self {
            default_policy: env::var(env_vars::DEFAULT_POLICY)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_POLICY_ID.to_string()),
            fail_fast: env::var(env_vars::FAIL_FAST)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            max_threads: env::var(env_vars::MAX_THREADS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            coverage_threshold_percent: env::var(env_vars::COVERAGE_THRESHOLD_PERCENT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(COVERAGE_LIMITED_THRESHOLD_PERCENT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Emit events as JSON lines
    pub use_structured_logging: bool,

    /// Print events to stdout/stderr
    pub enable_console_logging: bool,

    /// Forward events to the `log` facade instead of printing
    pub forward_to_log_facade: bool,

    /// Minimum level that gets logged
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            forward_to_log_facade: env::var(env_vars::LOGGING_FORWARD_TO_FACADE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub engine: EnginePreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse from TOML. Missing sections and keys fall back to defaults
    /// (which honour `MATRIX_*` environment variables).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.default_policy.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "engine.default_policy".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.engine.max_threads > MAX_WORKER_THREADS * 4 {
            return Err(ConfigError::Invalid {
                field: "engine.max_threads".to_string(),
                reason: format!("{} exceeds {}", self.engine.max_threads, MAX_WORKER_THREADS * 4),
            });
        }

        if self.engine.coverage_threshold_percent == 0
            || self.engine.coverage_threshold_percent > 100
        {
            return Err(ConfigError::Invalid {
                field: "engine.coverage_threshold_percent".to_string(),
                reason: "must be within 1..=100".to_string(),
            });
        }

        Ok(())
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Engine
    pub const DEFAULT_POLICY: &str = "MATRIX_DEFAULT_POLICY";
    pub const FAIL_FAST: &str = "MATRIX_FAIL_FAST";
    pub const MAX_THREADS: &str = "MATRIX_MAX_THREADS";
    pub const COVERAGE_THRESHOLD_PERCENT: &str = "MATRIX_COVERAGE_THRESHOLD_PERCENT";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "MATRIX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "MATRIX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_FORWARD_TO_FACADE: &str = "MATRIX_LOGGING_FORWARD_TO_FACADE";
    pub const LOGGING_MIN_LEVEL: &str = "MATRIX_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
[engine]
default_policy = "coverage"
fail_fast = true
max_threads = 2

[logging]
min_log_level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.engine.default_policy, "coverage");
        assert!(config.engine.fail_fast);
        assert_eq!(config.engine.max_threads, 2);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let result = RuntimeConfig::from_toml_str(
            r#"
[engine]
coverage_threshold_percent = 150
"#,
        );
        assert_matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "engine.coverage_threshold_percent");
    }

    #[test]
    fn test_malformed_toml() {
        assert_matches!(
            RuntimeConfig::from_toml_str("[engine\n"),
            Err(ConfigError::Parse { .. })
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.toml");
        std::fs::write(&path, "[engine]\ndefault_policy = \"hosting\"\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert_eq!(config.engine.default_policy, "hosting");

        assert_matches!(
            RuntimeConfig::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        );
    }

    #[test]
    fn test_env_var_names_share_prefix() {
        let names = [
            env_vars::DEFAULT_POLICY,
            env_vars::FAIL_FAST,
            env_vars::MAX_THREADS,
            env_vars::COVERAGE_THRESHOLD_PERCENT,
            env_vars::LOGGING_USE_STRUCTURED,
            env_vars::LOGGING_ENABLE_CONSOLE,
            env_vars::LOGGING_FORWARD_TO_FACADE,
            env_vars::LOGGING_MIN_LEVEL,
        ];
        assert!(names.iter().all(|name| name.starts_with("MATRIX_")));
    }
}
