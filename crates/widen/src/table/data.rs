//! Column-ordered table storage.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::{Result, WidenError};

use super::value::Value;

/// An ordered set of uniquely named columns, all of the same length.
///
/// Column order is insertion order and is preserved by every operation.
/// The row count is stored explicitly so that a table can have columns and
/// no rows, or rows and no columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: IndexMap<String, Vec<Value>>,
    row_count: usize,
}

impl Table {
    /// Create a table with `row_count` rows and no columns.
    pub fn new(row_count: usize) -> Self {
        Self {
            columns: IndexMap::new(),
            row_count,
        }
    }

    /// Build a table from a header and row-major records.
    pub fn from_rows<H, R>(headers: H, rows: Vec<R>) -> Result<Self>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<Value>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        let row_count = rows.len();

        for (row_idx, row) in rows.into_iter().enumerate() {
            let mut found = 0;
            for value in row {
                if let Some(column) = columns.get_mut(found) {
                    column.push(value.into());
                }
                found += 1;
            }
            if found != headers.len() {
                return Err(WidenError::RaggedRow {
                    row: row_idx,
                    expected: headers.len(),
                    found,
                });
            }
        }

        let mut table = Table::new(row_count);
        for (name, values) in headers.into_iter().zip(columns) {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// Append a column at the right edge of the table.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if values.len() != self.row_count {
            return Err(WidenError::ColumnLength {
                column: name,
                expected: self.row_count,
                found: values.len(),
            });
        }
        match self.columns.entry(name) {
            Entry::Occupied(e) => Err(WidenError::DuplicateColumn(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(values);
                Ok(())
            }
        }
    }

    /// Assemble a table from already validated parts.
    pub(crate) fn from_parts(columns: IndexMap<String, Vec<Value>>, row_count: usize) -> Self {
        debug_assert!(columns.values().all(|c| c.len() == row_count));
        Self { columns, row_count }
    }

    /// Iterate over `(name, values)` pairs in column order.
    pub(crate) fn columns(&self) -> impl Iterator<Item = (&String, &Vec<Value>)> {
        self.columns.iter()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Check whether a column exists.
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Get the position of a column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Get all values of a column by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    /// Get a view of one row.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.row_count).then_some(Row { table: self, index })
    }

    /// Iterate over all rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.row_count).map(move |index| Row { table: self, index })
    }
}

/// Tables are equal when they have the same columns, in the same order, with
/// the same values.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.row_count == other.row_count
            && self.columns.len() == other.columns.len()
            && self.columns.iter().zip(other.columns.iter()).all(|(a, b)| a == b)
    }
}

/// A borrowed view of a single row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of the row in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the value of a column in this row.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.table.get(self.index, column)
    }

    /// Iterate over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let index = self.index;
        self.table
            .columns
            .iter()
            .map(move |(name, values)| (name.as_str(), &values[index]))
    }

    /// Collect the row's values in column order.
    pub fn values(&self) -> Vec<&'a Value> {
        self.iter().map(|(_, v)| v).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            ["id", "colour"],
            vec![
                vec![Value::from(1i64), Value::from("red")],
                vec![Value::from(2i64), Value::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_names(), vec!["id", "colour"]);
        assert_eq!(table.get(0, "colour"), Some(&Value::from("red")));
        assert_eq!(table.get(1, "colour"), Some(&Value::Missing));
        assert_eq!(table.column_index("colour"), Some(1));
    }

    #[test]
    fn test_from_rows_rejects_duplicate_header() {
        let err = Table::from_rows(["a", "a"], vec![vec!["1", "2"]]).unwrap_err();
        assert!(matches!(err, WidenError::DuplicateColumn(ref c) if c == "a"));
    }

    #[test]
    fn test_from_rows_rejects_ragged_row() {
        let err = Table::from_rows(["a", "b"], vec![vec!["1", "2"], vec!["3"]]).unwrap_err();
        assert!(matches!(
            err,
            WidenError::RaggedRow { row: 1, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_push_column_length_mismatch() {
        let mut table = sample();
        assert!(table.push_column("extra", vec![Value::Missing]).is_err());
        assert!(table.push_column("extra", vec![Value::Missing; 2]).is_ok());
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn test_row_view() {
        let table = sample();
        let row = table.row(0).unwrap();
        let pairs: Vec<_> = row.iter().collect();
        assert_eq!(pairs, vec![("id", &Value::from(1i64)), ("colour", &Value::from("red"))]);
        assert!(table.row(2).is_none());
        assert_eq!(table.rows().count(), 2);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = Table::from_rows(["x", "y"], vec![vec!["1", "2"]]).unwrap();
        let b = Table::from_rows(["y", "x"], vec![vec!["2", "1"]]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_zero_rows_with_columns() {
        let table = Table::from_rows(["a", "b"], Vec::<Vec<&str>>::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column("a"), Some(&[][..]));
    }
}
