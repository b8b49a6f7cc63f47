//! Identifiers and catalog of the reference deployment

use matrix_core::{CatalogError, DependencyCatalog, Service};

pub const REGIONS: [&str; 5] = ["USA", "Europe", "UAE", "APAC", "Saudi"];

pub const LANGUAGES: [&str; 7] = [
    "English", "Hindi", "Spanish", "German", "Arabic", "French", "Italian",
];

pub const SERVICES: [&str; 10] = [
    "ASR",
    "Redaction",
    "Conversation Facts",
    "Gen AI Disposition",
    "ITN",
    "Intent (UniFit)",
    "Entity (NER/Spacy)",
    "Gen AI Summary",
    "Pro-active Service",
    "LLM",
];

/// Product dependencies, in dashboard column order
pub const PRODUCTS: [(&str, &[&str]); 4] = [
    ("SSA", &["ASR", "Gen AI Summary", "LLM", "Conversation Facts"]),
    (
        "RTGA",
        &[
            "ASR",
            "Intent (UniFit)",
            "Entity (NER/Spacy)",
            "Gen AI Disposition",
            "LLM",
            "Pro-active Service",
        ],
    ),
    (
        "CIA",
        &[
            "Intent (UniFit)",
            "Entity (NER/Spacy)",
            "Gen AI Summary",
            "Conversation Facts",
            "LLM",
        ],
    ),
    ("CRA", &["ASR", "Redaction"]),
];

/// Catalog restricted to [`SERVICES`]
pub fn catalog() -> Result<DependencyCatalog, CatalogError> {
    PRODUCTS
        .iter()
        .fold(
            DependencyCatalog::builder().with_services(SERVICES.iter().copied().map(Service::from)),
            |builder, (product, services)| builder.product(*product, services.iter().copied()),
        )
        .build()
}
