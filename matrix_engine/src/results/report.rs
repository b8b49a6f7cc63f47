//! Evaluation report: a status table plus run metadata

use super::error::ExportError;
use super::table::{StatusSummary, StatusTable};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Unique identifier for this run
    pub run_id: String,
    pub policy_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub summary: StatusSummary,
    #[serde(rename = "cells")]
    pub table: StatusTable,
}

impl EvaluationReport {
    pub fn new(table: StatusTable, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            policy_id: table.policy_id().to_string(),
            started_at,
            finished_at,
            duration_ms,
            summary: table.summary(),
            table,
        }
    }

    pub fn is_success(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Run {} [{}] {}ms: {}",
            self.run_id, self.policy_id, self.duration_ms, self.summary
        )
    }
}
