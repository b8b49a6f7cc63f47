//! # Availability Matrix Engine
//!
//! Derives a composite availability status for every
//! (region, product, language) cell from per-service availability facts.
//!
//! ## Layout
//! - [`policies`] - pure strategies mapping dependency facts to a status
//! - [`aggregation`] - dependency gathering, region-count index and the
//!   cell evaluation loop
//! - [`results`] - status table, summaries, dashboard views and exports
//! - [`providers`] - fact and catalog sources (static, JSON, CSV, TOML)
//! - [`api`] - high-level processor tying the pieces together
//!
//! ## Example
//! ```
//! use matrix_core::{AvailabilityFact, DependencyCatalog, FactStore, ServiceStatus};
//! use matrix_engine::aggregation::{evaluate, EvaluationOptions, EvaluationScope};
//! use matrix_engine::policies::create_policy_registry;
//!
//! let store = FactStore::from_facts(vec![
//!     AvailabilityFact::new("USA", "ASR", "English", ServiceStatus::Full),
//!     AvailabilityFact::new("USA", "Redaction", "English", ServiceStatus::Limited),
//! ])
//! .unwrap();
//! let catalog = DependencyCatalog::builder()
//!     .product("CRA", ["ASR", "Redaction"])
//!     .build()
//!     .unwrap();
//! let registry = create_policy_registry();
//! let policy = registry.get("escalation").unwrap();
//!
//! let scope = EvaluationScope::from_store(&store);
//! let table = evaluate(&scope, &catalog, &store, policy, &EvaluationOptions::default()).unwrap();
//! let status = table.status_of(&"USA".into(), &"CRA".into(), &"English".into());
//! assert_eq!(status.map(|s| s.label), Some("Limited Support"));
//! ```

pub mod aggregation;
pub mod api;
pub mod policies;
pub mod providers;
pub mod results;

pub use aggregation::{evaluate, CellError, EvaluationError, EvaluationOptions, EvaluationScope};
pub use api::{MatrixProcessor, ProcessorConfig, ProcessorError};
pub use policies::{create_policy_registry, AvailabilityPolicy, PolicyError, PolicyRegistry};
pub use results::{CellKey, EvaluationReport, StatusSummary, StatusTable};
