use super::ids::{Product, Service};
use serde::{Deserialize, Serialize};

/// Services a product requires. Order only fixes iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDependency {
    pub product: Product,
    pub required_services: Vec<Service>,
}

impl ProductDependency {
    pub fn new<I, S>(product: impl Into<Product>, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Service>,
    {
        Self {
            product: product.into(),
            required_services: services.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.required_services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required_services.is_empty()
    }
}
