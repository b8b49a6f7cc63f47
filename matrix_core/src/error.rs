//! Error types for the fact store and dependency catalog

use crate::logging::{codes, Code};
use crate::types::{FactKey, Product, Service};

/// Fact store construction and lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactError {
    /// No fact exists for the triple. This means "undefined for this
    /// context", not "Not Supported".
    #[error("No availability fact for '{key}'")]
    FactNotFound { key: FactKey },

    #[error("Duplicate availability fact for '{key}'")]
    DuplicateFact { key: FactKey },

    #[error("Identifier '{value}' is invalid: {reason}")]
    InvalidIdentifier { value: String, reason: String },
}

impl FactError {
    pub fn not_found(key: FactKey) -> Self {
        FactError::FactNotFound { key }
    }

    pub fn code(&self) -> Code {
        match self {
            FactError::FactNotFound { .. } => codes::facts::FACT_NOT_FOUND,
            FactError::DuplicateFact { .. } => codes::facts::DUPLICATE_FACT,
            FactError::InvalidIdentifier { .. } => codes::facts::INVALID_IDENTIFIER,
        }
    }
}

/// Dependency catalog errors. All of these are fatal for an evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown product: {0}")]
    UnknownProduct(Product),

    #[error("Product '{product}' depends on unknown service '{service}'")]
    UnknownService { product: Product, service: Service },

    #[error("Product '{0}' declares no required services")]
    EmptyDependencies(Product),

    #[error("Product '{product}' lists service '{service}' more than once")]
    DuplicateDependency { product: Product, service: Service },

    #[error("Product '{0}' is declared more than once")]
    DuplicateProduct(Product),

    #[error("Catalog parse error: {reason}")]
    ParseError { reason: String },
}

impl CatalogError {
    pub fn code(&self) -> Code {
        match self {
            CatalogError::UnknownProduct(_) => codes::catalog::UNKNOWN_PRODUCT,
            CatalogError::UnknownService { .. } => codes::catalog::UNKNOWN_SERVICE,
            _ => codes::catalog::INVALID_CATALOG,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::UnknownProduct(product) => {
                format!("Product '{}' is not in the dependency catalog", product)
            }
            CatalogError::UnknownService { product, service } => format!(
                "Catalog entry for '{}' references '{}', which is not a known service",
                product, service
            ),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_not_found_message_names_key() {
        let error = FactError::not_found(FactKey::new("USA", "ASR", "Hindi"));
        assert_eq!(error.to_string(), "No availability fact for 'USA|ASR|Hindi'");
    }

    #[test]
    fn test_error_codes() {
        let duplicate = FactError::DuplicateFact {
            key: FactKey::new("USA", "ASR", "English"),
        };
        assert_eq!(duplicate.code(), codes::facts::DUPLICATE_FACT);
        assert_eq!(
            CatalogError::UnknownProduct(Product::from("XYZ")).code(),
            codes::catalog::UNKNOWN_PRODUCT
        );
        assert_eq!(
            CatalogError::DuplicateProduct(Product::from("CRA")).code(),
            codes::catalog::INVALID_CATALOG
        );
    }

    #[test]
    fn test_catalog_user_message() {
        let error = CatalogError::UnknownService {
            product: Product::from("CRA"),
            service: Service::from("OCR"),
        };
        assert!(error.user_message().contains("'OCR'"));
        assert_eq!(
            CatalogError::EmptyDependencies(Product::from("X")).user_message(),
            "Product 'X' declares no required services"
        );
    }
}
