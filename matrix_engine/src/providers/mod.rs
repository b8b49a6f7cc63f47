//! # Providers
//!
//! Loaders that turn files or in-memory data into a [`FactStore`] and a
//! [`DependencyCatalog`]. Every loaded identifier is validated before it
//! reaches the store.
//!
//! [`FactStore`]: matrix_core::FactStore
//! [`DependencyCatalog`]: matrix_core::DependencyCatalog

pub mod catalog;
pub mod errors;
pub mod facts;

pub use catalog::{CatalogProvider, StaticCatalogProvider, TomlCatalogProvider};
pub use errors::ProviderError;
pub use facts::{
    fact_provider_for_path, parse_csv_facts, parse_json_facts, CsvFactProvider,
    DirectoryFactProvider, FactProvider, JsonFactProvider, StaticFactProvider,
};
