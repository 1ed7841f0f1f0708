//! Outcomes of expansions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::WidenError;
use crate::table::Table;

use super::plan::ExpansionPlan;

/// Summary of one completed expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionReport {
    /// The plan that was carried out.
    pub plan: ExpansionPlan,

    /// Whether the source column was dropped.
    pub source_removed: bool,

    /// Rows that needed padding with the missing marker.
    pub rows_padded: usize,
}

impl ExpansionReport {
    /// New columns in splice order, count column last.
    pub fn columns_added(&self) -> Vec<&str> {
        self.plan.new_columns().collect()
    }

    /// Get a human-readable description of the expansion.
    pub fn description(&self) -> String {
        format!(
            "Widened '{}' into {} column(s){}{}",
            self.plan.source_column,
            self.plan.new_columns().count(),
            if self.rows_padded > 0 {
                format!(", padded {} row(s)", self.rows_padded)
            } else {
                String::new()
            },
            if self.source_removed {
                ", source dropped"
            } else {
                ""
            }
        )
    }
}

/// Result of applying a list of specs.
#[derive(Debug, Clone)]
pub struct ExpandResult {
    /// The widened table.
    pub table: Table,

    /// One report per spec, in application order.
    pub reports: Vec<ExpansionReport>,
}

impl ExpandResult {
    /// Start from an untouched table.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            reports: Vec::new(),
        }
    }

    /// Total number of columns added across all specs.
    pub fn columns_added(&self) -> usize {
        self.reports
            .iter()
            .map(|r| r.plan.new_columns().count())
            .sum()
    }
}

/// A spec in a batch failed.
///
/// `partial` is the table as of the last successful expansion, so the
/// caller can keep the work done before the failing spec.
#[derive(Debug, Error)]
#[error("Spec #{index} ('{source_column}') failed: {error}")]
pub struct BatchError {
    /// Zero-based position of the failing spec.
    pub index: usize,

    /// Source column named by the failing spec.
    pub source_column: String,

    /// Table produced by the specs before `index`.
    pub partial: Table,

    /// Why the spec failed.
    #[source]
    pub error: WidenError,
}

impl From<BatchError> for WidenError {
    fn from(e: BatchError) -> Self {
        WidenError::Expansion {
            index: e.index,
            source_column: e.source_column,
            source: Box::new(e.error),
        }
    }
}
