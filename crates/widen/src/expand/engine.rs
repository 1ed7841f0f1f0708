//! Expansion engine: single-column splice and the multi-column fold.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, info};

use crate::error::{Result, WidenError};
use crate::table::{Table, Value};

use super::plan::prepare;
use super::result::{BatchError, ExpandResult, ExpansionReport};
use super::spec::MultiValueFieldSpec;

/// Widen one column of `table` according to `spec`.
///
/// Returns a new table; `table` itself is never modified. The source
/// column's slot is replaced by `[source?, source_1 .. source_max,
/// source_nselected?]` and every other column keeps its position.
///
/// ```
/// use widen::{Delimiter, MultiValueFieldSpec, Table, Value, expand};
///
/// let table = Table::from_rows(["q1"], vec![vec!["a, b"], vec!["c"]]).unwrap();
/// let spec = MultiValueFieldSpec::new("q1", Delimiter::literal(",")).with_count();
/// let wide = expand(&table, &spec).unwrap();
///
/// assert_eq!(wide.column_names(), vec!["q1_1", "q1_2", "q1_nselected"]);
/// assert_eq!(wide.get(1, "q1_2"), Some(&Value::Missing));
/// ```
pub fn expand(table: &Table, spec: &MultiValueFieldSpec) -> Result<Table> {
    expand_with_report(table, spec).map(|(table, _)| table)
}

/// Like [`expand`], also returning a report of what changed.
pub fn expand_with_report(
    table: &Table,
    spec: &MultiValueFieldSpec,
) -> Result<(Table, ExpansionReport)> {
    let (plan, splits) = prepare(table, spec)?;
    let row_count = table.row_count();
    let max = plan.max_selections;

    let counts: Vec<usize> = splits.iter().map(|s| s.count).collect();
    let rows_padded = counts.iter().filter(|&&c| c < max).count();

    // Transpose row-wise tokens into column-wise values, padding short rows.
    let mut generated: Vec<Vec<Value>> = vec![Vec::with_capacity(row_count); max];
    for split in splits {
        let mut tokens = split.tokens.into_iter();
        for column in generated.iter_mut() {
            column.push(tokens.next().unwrap_or_default());
        }
    }

    let mut columns: IndexMap<String, Vec<Value>> =
        IndexMap::with_capacity(table.column_count() + plan.new_columns().count());

    for (name, values) in table.columns() {
        if *name != plan.source_column {
            columns.insert(name.clone(), values.clone());
            continue;
        }

        if !spec.remove_source {
            columns.insert(name.clone(), values.clone());
        }
        for (generated_name, values) in plan.generated.iter().zip(generated.drain(..)) {
            columns.insert(generated_name.clone(), values);
        }
        if let Some(ref count_name) = plan.count_column {
            let values = counts.iter().map(|&c| Value::from(c as i64)).collect();
            columns.insert(count_name.clone(), values);
        }
    }

    let report = ExpansionReport {
        plan,
        source_removed: spec.remove_source,
        rows_padded,
    };

    debug!("{}", report.description());

    Ok((Table::from_parts(columns, row_count), report))
}

/// Applies a sequence of specs to a table, one after another.
///
/// Each spec sees the table produced by the previous one, so a later spec's
/// collision check includes columns generated earlier. Specs are never
/// reordered or run concurrently.
pub struct ColumnExpander;

impl ColumnExpander {
    /// Create a new expander.
    pub fn new() -> Self {
        Self
    }

    /// Apply `specs` in order, stopping at the first failure.
    pub fn apply(
        &self,
        table: &Table,
        specs: &[MultiValueFieldSpec],
    ) -> std::result::Result<ExpandResult, BatchError> {
        info!(
            "Expanding {} column(s) over {} row(s)",
            specs.len(),
            table.row_count()
        );

        let mut generated: HashSet<String> = HashSet::new();

        specs
            .iter()
            .enumerate()
            .try_fold(ExpandResult::new(table.clone()), |mut acc, (index, spec)| {
                let step = if generated.contains(&spec.source_column) {
                    Err(WidenError::invalid_spec(
                        &spec.source_column,
                        "column was generated by an earlier spec",
                    ))
                } else {
                    expand_with_report(&acc.table, spec)
                };

                match step {
                    Ok((table, report)) => {
                        generated.extend(report.plan.new_columns().map(str::to_string));
                        acc.table = table;
                        acc.reports.push(report);
                        Ok(acc)
                    }
                    Err(error) => {
                        debug!("Spec #{} ('{}') failed: {}", index, spec.source_column, error);
                        Err(BatchError {
                            index,
                            source_column: spec.source_column.clone(),
                            partial: acc.table,
                            error,
                        })
                    }
                }
            })
    }
}

impl Default for ColumnExpander {
    fn default() -> Self {
        Self::new()
    }
}
