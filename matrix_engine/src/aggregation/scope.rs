//! The regions, languages and products an evaluation covers

use matrix_core::{FactStore, Language, Product, Region};
use std::collections::HashSet;
use std::hash::Hash;

/// Axes of the evaluation's Cartesian product.
///
/// Duplicates are dropped keeping the first occurrence, so the region count
/// used by global policies is the number of distinct regions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvaluationScope {
    regions: Vec<Region>,
    languages: Vec<Language>,
    products: Option<Vec<Product>>,
}

fn dedup_preserving_order<T: Clone + Eq + Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

impl EvaluationScope {
    pub fn new<R, L>(regions: R, languages: L) -> Self
    where
        R: IntoIterator,
        R::Item: Into<Region>,
        L: IntoIterator,
        L::Item: Into<Language>,
    {
        Self {
            regions: dedup_preserving_order(regions.into_iter().map(Into::into).collect()),
            languages: dedup_preserving_order(languages.into_iter().map(Into::into).collect()),
            products: None,
        }
    }

    /// Every region and language present in the store, sorted
    pub fn from_store(store: &FactStore) -> Self {
        Self::new(store.regions(), store.languages())
    }

    /// Restrict the run to a subset of the catalog's products
    pub fn with_products<P>(mut self, products: P) -> Self
    where
        P: IntoIterator,
        P::Item: Into<Product>,
    {
        self.products = Some(dedup_preserving_order(
            products.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Explicit product selection; `None` means the whole catalog
    pub fn products(&self) -> Option<&[Product]> {
        self.products.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_core::{AvailabilityFact, ServiceStatus};

    #[test]
    fn test_duplicates_removed_in_order() {
        let scope = EvaluationScope::new(["USA", "UAE", "USA"], ["English"])
            .with_products(["CRA", "SSA", "CRA"]);
        assert_eq!(scope.regions(), &[Region::from("USA"), Region::from("UAE")]);
        assert_eq!(
            scope.products().unwrap(),
            &[Product::from("CRA"), Product::from("SSA")]
        );
    }

    #[test]
    fn test_from_store() {
        let store = FactStore::from_facts(vec![
            AvailabilityFact::new("USA", "ASR", "Hindi", ServiceStatus::Full),
            AvailabilityFact::new("APAC", "ASR", "English", ServiceStatus::Full),
        ])
        .unwrap();
        let scope = EvaluationScope::from_store(&store);
        assert_eq!(scope.regions(), &[Region::from("APAC"), Region::from("USA")]);
        assert_eq!(scope.languages().len(), 2);
        assert!(scope.products().is_none());
    }
}
