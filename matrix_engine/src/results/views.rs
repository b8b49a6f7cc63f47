//! Dashboard views: one region, languages as rows.
//!
//! The product dashboard shows composite statuses per product; the service
//! dashboard shows raw facts per service. Absent data is rendered as an empty
//! cell, never as "Not Supported".

use super::table::StatusTable;
use matrix_core::{FactStore, Language, Region, Service, Vocabulary};
use serde::Serialize;
use std::fmt;

pub const PRODUCT_DASHBOARD_TITLE: &str = "PRODUCT AVAILABILITY MATRIX";
pub const SERVICE_DASHBOARD_TITLE: &str = "SERVICE AVAILABILITY MATRIX";

/// Marker shown for a failed product cell
pub const ERROR_MARKER: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub language: Language,
    /// One entry per column; `None` when there is nothing to show
    pub cells: Vec<Option<String>>,
}

/// Languages x columns grid for one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixView {
    pub title: String,
    pub region: Region,
    pub columns: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl MatrixView {
    pub fn cell(&self, language: &Language, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|row| &row.language == language)
            .and_then(|row| row.cells.get(col))
            .and_then(|cell| cell.as_deref())
    }

    /// Plain-text grid with padded columns
    pub fn render_text(&self) -> String {
        let header = "Language";
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        let mut first_width = header.len();

        for row in &self.rows {
            first_width = first_width.max(row.language.as_str().len());
            for (i, cell) in row.cells.iter().enumerate() {
                if let (Some(width), Some(text)) = (widths.get_mut(i), cell) {
                    *width = (*width).max(text.len());
                }
            }
        }

        let mut out = format!("{}\nRegion: {}\n\n", self.title, self.region);
        out.push_str(&format!("{:<w$}", header, w = first_width));
        for (column, width) in self.columns.iter().zip(&widths) {
            out.push_str(&format!(" | {:<w$}", column, w = *width));
        }
        out.push('\n');

        let rule_len = first_width + widths.iter().map(|w| w + 3).sum::<usize>();
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&format!("{:<w$}", row.language.as_str(), w = first_width));
            for (cell, width) in row.cells.iter().zip(&widths) {
                out.push_str(&format!(" | {:<w$}", cell.as_deref().unwrap_or(""), w = *width));
            }
            out.push('\n');
        }

        out
    }
}

impl fmt::Display for MatrixView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}

impl StatusTable {
    /// Product dashboard for one region: table languages x table products
    pub fn product_matrix(&self, region: &Region) -> MatrixView {
        let rows = self
            .languages()
            .iter()
            .map(|language| MatrixRow {
                language: language.clone(),
                cells: self
                    .products()
                    .iter()
                    .map(|product| {
                        let key = super::CellKey::new(region.clone(), product.clone(), language.clone());
                        self.get(&key).map(|outcome| match outcome {
                            Ok(status) => status.label.to_string(),
                            Err(_) => ERROR_MARKER.to_string(),
                        })
                    })
                    .collect(),
            })
            .collect();

        MatrixView {
            title: PRODUCT_DASHBOARD_TITLE.to_string(),
            region: region.clone(),
            columns: self.products().iter().map(|p| p.to_string()).collect(),
            rows,
        }
    }
}

/// Service dashboard for one region straight from the fact store.
///
/// Facts carrying a hosting attribute other than N/A show it in parentheses.
pub fn service_matrix(
    store: &FactStore,
    region: &Region,
    services: &[Service],
    languages: &[Language],
    vocabulary: Vocabulary,
) -> MatrixView {
    let rows = languages
        .iter()
        .map(|language| MatrixRow {
            language: language.clone(),
            cells: services
                .iter()
                .map(|service| {
                    store.get(region, service, language).ok().map(|fact| {
                        let label = fact.status.label(vocabulary);
                        match fact.hosting {
                            Some(hosting) if hosting != matrix_core::Hosting::NotApplicable => {
                                format!("{} ({})", label, hosting)
                            }
                            _ => label.to_string(),
                        }
                    })
                })
                .collect(),
        })
        .collect();

    MatrixView {
        title: SERVICE_DASHBOARD_TITLE.to_string(),
        region: region.clone(),
        columns: services.iter().map(|s| s.to_string()).collect(),
        rows,
    }
}
