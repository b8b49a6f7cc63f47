//! Catalog providers

use super::errors::ProviderError;
use matrix_core::logging::codes;
use matrix_core::DependencyCatalog;
use std::path::PathBuf;

/// Source of the product dependency catalog
pub trait CatalogProvider: Send + Sync {
    fn source_name(&self) -> String;

    fn load_catalog(&self) -> Result<DependencyCatalog, ProviderError>;
}

fn log_loaded(source: &str, catalog: &DependencyCatalog) {
    matrix_core::log_success!(
        codes::success::CATALOG_LOADED,
        "Dependency catalog loaded",
        "source" => source,
        "products" => catalog.len()
    );
}

/// Catalog built in code
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    catalog: DependencyCatalog,
}

impl StaticCatalogProvider {
    pub fn new(catalog: DependencyCatalog) -> Self {
        Self { catalog }
    }
}

impl CatalogProvider for StaticCatalogProvider {
    fn source_name(&self) -> String {
        "static".to_string()
    }

    fn load_catalog(&self) -> Result<DependencyCatalog, ProviderError> {
        log_loaded(&self.source_name(), &self.catalog);
        Ok(self.catalog.clone())
    }
}

/// TOML catalog file with a `[products]` table and optional `services` list
#[derive(Debug, Clone)]
pub struct TomlCatalogProvider {
    path: PathBuf,
}

impl TomlCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogProvider for TomlCatalogProvider {
    fn source_name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_catalog(&self) -> Result<DependencyCatalog, ProviderError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| ProviderError::io(&self.path, e))?;
        let catalog = DependencyCatalog::from_toml_str(&content)?;
        log_loaded(&self.source_name(), &catalog);
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use matrix_core::{CatalogError, Product, Service};

    #[test]
    fn test_toml_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
services = ["ASR", "Redaction", "ITN"]

[products]
CRA = ["ASR", "Redaction"]
RTGA = ["ASR", "ITN"]
"#,
        )
        .unwrap();

        let catalog = TomlCatalogProvider::new(&path).load_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.dependencies_of(&Product::from("CRA")).unwrap(),
            &[Service::from("ASR"), Service::from("Redaction")]
        );
    }

    #[test]
    fn test_toml_catalog_unknown_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "services = [\"ASR\"]\n[products]\nCRA = [\"ASR\", \"OCR\"]\n")
            .unwrap();

        assert_matches!(
            TomlCatalogProvider::new(&path).load_catalog(),
            Err(ProviderError::Catalog(CatalogError::UnknownService { .. }))
        );
        assert_matches!(
            TomlCatalogProvider::new(dir.path().join("missing.toml")).load_catalog(),
            Err(ProviderError::Io { .. })
        );
    }

    #[test]
    fn test_static_catalog() {
        let catalog = DependencyCatalog::builder()
            .product("CIA", ["ASR", "LLM"])
            .build()
            .unwrap();
        let loaded = StaticCatalogProvider::new(catalog).load_catalog().unwrap();
        assert!(loaded.contains(&Product::from("CIA")));
    }
}
