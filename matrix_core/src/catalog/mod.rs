//! # Dependency Catalog
//!
//! Static mapping from product to the ordered set of services it requires.
//! A catalog is validated once when built and is immutable afterwards.

use crate::error::CatalogError;
use crate::types::{Product, ProductDependency, Service};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Validated, immutable product → services mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyCatalog {
    /// Declaration order of products
    order: Vec<Product>,
    entries: BTreeMap<Product, Vec<Service>>,
}

impl DependencyCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Required services of `product`, in declaration order
    pub fn dependencies_of(&self, product: &Product) -> Result<&[Service], CatalogError> {
        self.entries
            .get(product)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::UnknownProduct(product.clone()))
    }

    /// Products in declaration order
    pub fn products(&self) -> &[Product] {
        &self.order
    }

    pub fn contains(&self, product: &Product) -> bool {
        self.entries.contains_key(product)
    }

    /// Every service referenced by any product
    pub fn referenced_services(&self) -> BTreeSet<Service> {
        self.entries.values().flatten().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductDependency> + '_ {
        self.order.iter().map(|product| ProductDependency {
            product: product.clone(),
            required_services: self.entries[product].clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Parse a catalog from TOML:
    ///
    /// ```toml
    /// [products]
    /// CRA = ["ASR", "Redaction"]
    /// ```
    ///
    /// Products keep the order they appear in the document.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument =
            toml::from_str(content).map_err(|e| CatalogError::ParseError {
                reason: e.to_string(),
            })?;

        let mut builder = CatalogBuilder::new();
        if let Some(services) = document.services {
            builder = builder.with_services(services.into_iter().map(Service::from));
        }
        for (product, value) in document.products {
            let services: Vec<String> =
                value.try_into().map_err(|e: toml::de::Error| CatalogError::ParseError {
                    reason: format!("products.{}: {}", product, e),
                })?;
            builder = builder.product(product, services);
        }
        builder.build()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    /// Optional service universe to validate against
    #[serde(default)]
    services: Option<Vec<String>>,
    // Ordered with toml's `preserve_order` feature
    products: toml::Table,
}

/// Builder that validates catalog entries
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<ProductDependency>,
    services: Option<BTreeSet<Service>>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict dependencies to a known service universe
    pub fn with_services<I>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = Service>,
    {
        self.services = Some(services.into_iter().collect());
        self
    }

    pub fn product<I, S>(mut self, product: impl Into<Product>, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Service>,
    {
        self.entries.push(ProductDependency::new(product, services));
        self
    }

    pub fn dependency(mut self, dependency: ProductDependency) -> Self {
        self.entries.push(dependency);
        self
    }

    pub fn build(self) -> Result<DependencyCatalog, CatalogError> {
        let mut catalog = DependencyCatalog::default();

        for dependency in self.entries {
            let ProductDependency {
                product,
                required_services,
            } = dependency;

            if catalog.entries.contains_key(&product) {
                return Err(CatalogError::DuplicateProduct(product));
            }
            if required_services.is_empty() {
                return Err(CatalogError::EmptyDependencies(product));
            }

            let mut seen = HashSet::new();
            for service in &required_services {
                if !seen.insert(service) {
                    return Err(CatalogError::DuplicateDependency {
                        product: product.clone(),
                        service: service.clone(),
                    });
                }
                if let Some(universe) = &self.services {
                    if !universe.contains(service) {
                        return Err(CatalogError::UnknownService {
                            product: product.clone(),
                            service: service.clone(),
                        });
                    }
                }
            }

            catalog.order.push(product.clone());
            catalog.entries.insert(product, required_services);
        }

        Ok(catalog)
    }
}
