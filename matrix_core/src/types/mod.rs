//! Core data model types

pub mod dependency;
pub mod fact;
pub mod ids;
pub mod status;

pub use dependency::ProductDependency;
pub use fact::{AvailabilityFact, FactKey, LOOKUP_KEY_SEPARATOR};
pub use ids::{Language, Product, Region, Service};
pub use status::{
    Hosting, Locality, ProductStatus, ServiceStatus, StatusDomain, Tier, Vocabulary,
};
