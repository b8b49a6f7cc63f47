//! Logging service and sinks

use super::events::{LogEvent, LogLevel};
use crate::config::LoggingPreferences;
use std::sync::{Arc, Mutex};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with level filtering
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create new logging service with specified logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Pick a sink from user preferences
    pub fn from_preferences(preferences: &LoggingPreferences) -> Self {
        let min_level = preferences.min_log_level.to_events_log_level();
        let logger: Arc<dyn Logger> = if preferences.forward_to_log_facade {
            Arc::new(FacadeLogger)
        } else if !preferences.enable_console_logging {
            Arc::new(NullLogger)
        } else if preferences.use_structured_logging {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Check if level should be logged
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log an event
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Plain-text console logger
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        match event.level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", event.format()),
            _ => println!("{}", event.format()),
        }
    }
}

/// JSON-lines logger for tooling integration
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        let line = event.format_json().unwrap_or_else(|_| event.format());
        match event.level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

/// Forwards events to the `log` facade, so binaries can plug in any
/// `log` backend
pub struct FacadeLogger;

impl Logger for FacadeLogger {
    fn log(&self, event: &LogEvent) {
        let level = event.level.to_log_level();
        if event.context.is_empty() {
            log::log!(target: "matrix", level, "[{}] {}", event.code, event.message);
        } else {
            let context: Vec<String> = event
                .context
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            log::log!(
                target: "matrix",
                level,
                "[{}] {} ({})",
                event.code,
                event.message,
                context.join(", ")
            );
        }
    }
}

/// Discards every event
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Memory logger for testing
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel as RuntimeLogLevel;
    use crate::logging::codes;

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Info);

        service.log_event(LogEvent::debug("hidden"));
        service.log_event(LogEvent::info("shown"));
        service.log_event(LogEvent::error(codes::evaluation::WORKER_FAILURE, "also shown"));

        let events = memory.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "shown");
        assert!(events[1].is_error());
    }

    #[test]
    fn test_from_preferences_uses_min_level() {
        let preferences = LoggingPreferences {
            use_structured_logging: false,
            enable_console_logging: false,
            forward_to_log_facade: false,
            min_log_level: RuntimeLogLevel::Warning,
        };
        let service = LoggingService::from_preferences(&preferences);
        assert_eq!(service.min_level(), LogLevel::Warning);
        assert!(!service.should_log(LogLevel::Info));
    }

    #[test]
    fn test_memory_logger_clear() {
        let memory = MemoryLogger::new();
        memory.log(&LogEvent::info("one"));
        memory.clear();
        assert!(memory.events().is_empty());
    }
}
