//! Validation and sizing of a single expansion.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidenError};
use crate::split::{RowSplitter, Split};
use crate::table::Table;

use super::spec::MultiValueFieldSpec;

/// Suffix of the selection count column.
const COUNT_SUFFIX: &str = "nselected";

/// Name of the `index`-th (1-based) generated column for `source`.
pub fn selection_column(source: &str, index: usize) -> String {
    format!("{}_{}", source, index)
}

/// Name of the selection count column for `source`.
pub fn count_column(source: &str) -> String {
    format!("{}_{}", source, COUNT_SUFFIX)
}

/// What an expansion of one column will produce, computed from the whole
/// table before anything is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionPlan {
    /// Column being widened.
    pub source_column: String,
    /// Largest selection count over all rows (0 for an empty table).
    pub max_selections: usize,
    /// `source_1 ..= source_<max_selections>`.
    pub generated: Vec<String>,
    /// Count column, when requested.
    pub count_column: Option<String>,
}

impl ExpansionPlan {
    /// All new column names in splice order.
    pub fn new_columns(&self) -> impl Iterator<Item = &str> {
        self.generated
            .iter()
            .chain(self.count_column.iter())
            .map(|s| s.as_str())
    }
}

/// Validate `spec` against `table` and compute its plan without building
/// any columns.
pub fn plan(table: &Table, spec: &MultiValueFieldSpec) -> Result<ExpansionPlan> {
    prepare(table, spec).map(|(plan, _)| plan)
}

/// Validate, split every row and size the expansion.
///
/// All failure modes are checked here so that the splice that follows
/// cannot fail half way.
pub(crate) fn prepare(table: &Table, spec: &MultiValueFieldSpec) -> Result<(ExpansionPlan, Vec<Split>)> {
    let source = spec.source_column.as_str();
    if source.is_empty() {
        return Err(WidenError::invalid_spec(source, "source column name is empty"));
    }

    let values = table
        .column(source)
        .ok_or_else(|| WidenError::ColumnNotFound(source.to_string()))?;

    let pattern = spec.delimiter.compile(source)?;

    let splits: Vec<Split> = values
        .iter()
        .map(|value| RowSplitter::split(value, &pattern, spec.numeric))
        .collect();

    let max_selections = splits.iter().map(|s| s.count).max().unwrap_or(0);

    let plan = ExpansionPlan {
        source_column: source.to_string(),
        max_selections,
        generated: (1..=max_selections)
            .map(|i| selection_column(source, i))
            .collect(),
        count_column: spec.emit_count.then(|| count_column(source)),
    };

    if let Some(existing) = plan.new_columns().find(|name| table.contains_column(name)) {
        return Err(WidenError::ColumnNameCollision {
            column: existing.to_string(),
            source_column: source.to_string(),
        });
    }

    debug!(
        "Planned '{}' split on {}: {} selection column(s){}",
        source,
        spec.delimiter,
        max_selections,
        if spec.emit_count { " + count" } else { "" }
    );

    Ok((plan, splits))
}
