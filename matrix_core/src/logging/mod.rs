//! Global logging for the availability matrix
//!
//! A process-wide [`LoggingService`] behind a `OnceLock`, a per-thread cell
//! context that is stamped onto every event, and the `log_*!` macros.

#[macro_use]
pub mod macros;
pub mod codes;
pub mod events;
pub mod service;

use crate::config::LoggingPreferences;
use crate::types::{Language, Product, Region};
use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, FacadeLogger, Logger, LoggingService, MemoryLogger, NullLogger,
    StructuredLogger,
};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static CELL_CONTEXT: RefCell<Option<CellContext>> = const { RefCell::new(None) };
}

/// The matrix cell a worker thread is currently evaluating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellContext {
    pub product: Product,
    pub region: Region,
    pub language: Language,
}

impl CellContext {
    pub fn new(product: &Product, region: &Region, language: &Language) -> Self {
        Self {
            product: product.clone(),
            region: region.clone(),
            language: language.clone(),
        }
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from preferences
pub fn init_global_logging(preferences: &LoggingPreferences) -> Result<(), String> {
    init_global_logging_with_service(Arc::new(LoggingService::from_preferences(preferences)))
}

/// Initialize with a prepared service
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        )
        .with_context("version", crate::config::build_info::version())
        .with_context("profile", crate::config::build_info::profile()),
    );

    Ok(())
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// CELL CONTEXT MANAGEMENT
// ============================================================================

pub fn set_cell_context(context: CellContext) {
    CELL_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

pub fn clear_cell_context() {
    CELL_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with the cell context set for the current thread
pub fn with_cell_context<F, R>(context: CellContext, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_cell_context(context);
    let result = f();
    clear_cell_context();
    result
}

pub fn get_current_cell_context() -> Option<CellContext> {
    CELL_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn decorate(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }

    if let Some(cell) = get_current_cell_context() {
        event = event
            .with_context("product", cell.product.as_str())
            .with_context("region", cell.region.as_str())
            .with_context("language", cell.language.as_str());
    }

    event
}

fn dispatch(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Used by `log_error!`. Known codes also carry their category and severity.
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(classify(decorate(LogEvent::error(code, message), context), code));
}

fn classify(event: LogEvent, code: Code) -> LogEvent {
    match codes::get_metadata(code.as_str()) {
        Some(metadata) => event
            .with_context("category", metadata.category)
            .with_context("severity", metadata.severity.as_str())
            .with_context("recoverable", if metadata.recoverable { "true" } else { "false" }),
        None => event,
    }
}

/// Used by `log_warning!`
pub fn log_warning_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(decorate(LogEvent::warning(message), context));
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(decorate(LogEvent::success(code, message), context));
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(decorate(LogEvent::info(message), context));
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(decorate(LogEvent::debug(message), context));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_context_is_thread_local_and_cleared() {
        let cell = CellContext::new(&"SSA".into(), &"USA".into(), &"English".into());

        let seen = with_cell_context(cell.clone(), get_current_cell_context);
        assert_eq!(seen, Some(cell.clone()));
        assert_eq!(get_current_cell_context(), None);

        set_cell_context(cell);
        let other_thread = std::thread::spawn(get_current_cell_context).join().unwrap();
        assert_eq!(other_thread, None);
        clear_cell_context();
    }

    #[test]
    fn test_decorate_adds_cell_fields() {
        let cell = CellContext::new(&"CRA".into(), &"UAE".into(), &"Arabic".into());
        let event = with_cell_context(cell, || {
            decorate(LogEvent::info("evaluating"), vec![("policy", "escalation")])
        });

        assert_eq!(event.context.get("product").map(String::as_str), Some("CRA"));
        assert_eq!(event.context.get("region").map(String::as_str), Some("UAE"));
        assert_eq!(event.context.get("language").map(String::as_str), Some("Arabic"));
        assert_eq!(event.context.get("policy").map(String::as_str), Some("escalation"));
    }

    #[test]
    fn test_error_events_carry_code_metadata() {
        let event = classify(
            LogEvent::error(codes::evaluation::MISSING_DEPENDENCY_DATA, "cell failed"),
            codes::evaluation::MISSING_DEPENDENCY_DATA,
        );
        assert_eq!(event.context.get("category").map(String::as_str), Some("evaluation"));
        assert_eq!(event.context.get("severity").map(String::as_str), Some("Medium"));
        assert_eq!(event.context.get("recoverable").map(String::as_str), Some("true"));

        let unknown = classify(LogEvent::error(Code::new("E999"), "x"), Code::new("E999"));
        assert!(unknown.context.get("category").is_none());
    }

    #[test]
    fn test_macros_are_safe_without_global_logger() {
        // The global logger may or may not be set by other tests; either way
        // logging must not panic.
        log_info!("no-op");
        log_debug!("no-op", "count" => 3);
        log_warning!("no-op", "reason" => "test");
        log_error!(codes::system::CONFIGURATION_ERROR, "no-op");
        log_success!(codes::success::FACTS_LOADED, "no-op", "count" => 0);
    }
}
