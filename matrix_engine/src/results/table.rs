//! Status table produced by an evaluation run

use crate::aggregation::CellError;
use matrix_core::{Language, Product, ProductStatus, Region};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Coordinates of one cell
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, Deserialize)]
pub struct CellKey {
    pub region: Region,
    pub product: Product,
    pub language: Language,
}

impl CellKey {
    pub fn new(region: Region, product: Product, language: Language) -> Self {
        Self {
            region,
            product,
            language,
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.region, self.product, self.language)
    }
}

/// A cell either has a composite status or an explicit error marker
pub type CellOutcome = Result<ProductStatus, CellError>;

/// Flat, serializable view of one cell
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct CellRecord {
    pub region: String,
    pub product: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CellRecord {
    pub fn from_cell(key: &CellKey, outcome: &CellOutcome) -> Self {
        let (status, error) = match outcome {
            Ok(status) => (Some(status.label.to_string()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            region: key.region.to_string(),
            product: key.product.to_string(),
            language: key.language.to_string(),
            status,
            error,
        }
    }
}

/// Cell counts of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct StatusSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Cells per status label
    pub by_status: BTreeMap<String, usize>,
}

impl StatusSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total as f64
        }
    }
}

impl fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells, {} evaluated ({:.1}%), {} failed",
            self.total,
            self.succeeded,
            self.success_rate() * 100.0,
            self.failed
        )?;
        for (label, count) in &self.by_status {
            write!(f, "\n  {}: {}", label, count)?;
        }
        Ok(())
    }
}

/// `(region, product, language)` -> outcome, plus the axes in scope order
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTable {
    policy_id: String,
    regions: Vec<Region>,
    products: Vec<Product>,
    languages: Vec<Language>,
    cells: BTreeMap<CellKey, CellOutcome>,
}

impl StatusTable {
    pub fn new(
        policy_id: impl Into<String>,
        regions: Vec<Region>,
        products: Vec<Product>,
        languages: Vec<Language>,
    ) -> Self {
        Self {
            policy_id: policy_id.into(),
            regions,
            products,
            languages,
            cells: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: CellKey, outcome: CellOutcome) {
        self.cells.insert(key, outcome);
    }

    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn get(&self, key: &CellKey) -> Option<&CellOutcome> {
        self.cells.get(key)
    }

    /// Status of a cell, `None` if the cell is absent or failed
    pub fn status_of(
        &self,
        region: &Region,
        product: &Product,
        language: &Language,
    ) -> Option<ProductStatus> {
        let key = CellKey::new(region.clone(), product.clone(), language.clone());
        self.cells.get(&key).and_then(|outcome| outcome.as_ref().ok().copied())
    }

    /// Cells in key order
    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &CellOutcome)> {
        self.cells.iter()
    }

    pub fn successes(&self) -> impl Iterator<Item = (&CellKey, &ProductStatus)> {
        self.cells
            .iter()
            .filter_map(|(key, outcome)| outcome.as_ref().ok().map(|status| (key, status)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&CellKey, &CellError)> {
        self.cells
            .iter()
            .filter_map(|(key, outcome)| outcome.as_ref().err().map(|error| (key, error)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn summary(&self) -> StatusSummary {
        let mut summary = StatusSummary {
            total: self.cells.len(),
            ..Default::default()
        };

        for outcome in self.cells.values() {
            match outcome {
                Ok(status) => {
                    summary.succeeded += 1;
                    *summary.by_status.entry(status.label.to_string()).or_insert(0) += 1;
                }
                Err(_) => summary.failed += 1,
            }
        }

        summary
    }

    pub fn records(&self) -> Vec<CellRecord> {
        self.cells
            .iter()
            .map(|(key, outcome)| CellRecord::from_cell(key, outcome))
            .collect()
    }
}

/// Serializes as the list of cell records
impl Serialize for StatusTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.cells.len()))?;
        for (key, outcome) in &self.cells {
            seq.serialize_element(&CellRecord::from_cell(key, outcome))?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::{EscalationStatus, GlobalStatus};
    use matrix_core::{Service, StatusDomain};

    fn key(region: &str, product: &str, language: &str) -> CellKey {
        CellKey::new(region.into(), product.into(), language.into())
    }

    fn sample() -> StatusTable {
        let mut table = StatusTable::new(
            "escalation",
            vec!["USA".into()],
            vec!["SSA".into(), "CRA".into()],
            vec!["English".into(), "Hindi".into()],
        );
        table.insert(
            key("USA", "SSA", "English"),
            Ok(EscalationStatus::FullSupport.to_product_status()),
        );
        table.insert(
            key("USA", "CRA", "English"),
            Ok(EscalationStatus::LimitedSupport.to_product_status()),
        );
        table.insert(
            key("USA", "SSA", "Hindi"),
            Ok(EscalationStatus::FullSupport.to_product_status()),
        );
        table.insert(
            key("USA", "CRA", "Hindi"),
            Err(CellError::missing(
                &Service::from("Redaction"),
                &"USA".into(),
                &"Hindi".into(),
            )),
        );
        table
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.by_status.get("Full Support"), Some(&2));
        assert_eq!(summary.by_status.get("Limited Support"), Some(&1));
        assert!(summary.to_string().contains("1 failed"));
    }

    #[test]
    fn test_status_of_ignores_failures() {
        let table = sample();
        assert!(table
            .status_of(&"USA".into(), &"CRA".into(), &"Hindi".into())
            .is_none());
        assert_eq!(
            table
                .status_of(&"USA".into(), &"CRA".into(), &"English".into())
                .map(|s| s.label),
            Some("Limited Support")
        );
        assert!(table.has_failures());
    }

    #[test]
    fn test_serializes_as_records() {
        let json = serde_json::to_value(sample()).unwrap();
        let cells = json.as_array().unwrap();
        assert_eq!(cells.len(), 4);

        let failed = cells
            .iter()
            .find(|c| c["product"] == "CRA" && c["language"] == "Hindi")
            .unwrap();
        assert!(failed.get("status").is_none());
        assert!(failed["error"].as_str().unwrap().contains("Redaction"));
    }

    #[test]
    fn test_cell_key_display_and_order() {
        assert_eq!(key("UAE", "CRA", "Arabic").to_string(), "(UAE, CRA, Arabic)");
        assert!(key("APAC", "SSA", "English") < key("USA", "CRA", "Arabic"));

        let status = GlobalStatus::FullCrossRegion.to_product_status();
        assert!(status.is_cross_region());
    }
}
