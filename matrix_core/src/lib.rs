//! # Availability Matrix Core
//!
//! Data model and shared infrastructure for the availability matrix:
//! identifiers and status domains, the fact store, the dependency catalog,
//! the error taxonomy, runtime configuration and structured logging.

// Internal modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod facts;
#[macro_use]
pub mod logging;
pub mod types;

// Re-export key types for library consumers
pub use catalog::{CatalogBuilder, DependencyCatalog};
pub use error::{CatalogError, FactError};
pub use facts::FactStore;
pub use types::{
    AvailabilityFact, FactKey, Hosting, Language, Locality, Product, ProductDependency,
    ProductStatus, Region, Service, ServiceStatus, StatusDomain, Tier, Vocabulary,
};
