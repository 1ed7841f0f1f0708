//! Widen: turn multi-response columns into one scalar column per selection.
//!
//! A multi-response cell such as `"red, green, blue"` holds a variable number
//! of selections joined by a delimiter. Widening a column splits every cell,
//! finds the largest selection count over the whole table and replaces the
//! column with that many `<column>_<n>` columns, padding short rows with
//! [`Value::Missing`]. An optional `<column>_nselected` column records each
//! row's selection count.
//!
//! # Core Principles
//!
//! - **Pure**: [`expand`] builds a new [`Table`] and never mutates its input
//! - **Ordered**: column order is preserved and new columns take the source
//!   column's slot
//! - **Strict**: missing columns and name collisions are errors, never
//!   silent overwrites
//!
//! # Example
//!
//! ```
//! use widen::{ColumnExpander, Delimiter, MultiValueFieldSpec, Table};
//!
//! let table = Table::from_rows(
//!     ["id", "colours"],
//!     vec![vec!["1", "red, green"], vec!["2", "blue"]],
//! )
//! .unwrap();
//!
//! let specs = vec![MultiValueFieldSpec::new("colours", Delimiter::literal(",")).with_count()];
//! let result = ColumnExpander::new().apply(&table, &specs).unwrap();
//!
//! assert_eq!(
//!     result.table.column_names(),
//!     vec!["id", "colours_1", "colours_2", "colours_nselected"]
//! );
//! ```

pub mod error;
pub mod expand;
pub mod input;
pub mod output;
pub mod split;
pub mod table;

mod widener;

pub use crate::widener::{WidenConfig, WidenOutcome, Widener};
pub use error::{Result, WidenError};
pub use expand::{
    BatchError, ColumnExpander, ExpandResult, ExpansionPlan, ExpansionReport, MultiValueFieldSpec,
    expand, expand_with_report, plan,
};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use output::{OutputFormat, Writer, WriterConfig};
pub use split::{Delimiter, DelimiterPattern, NumericMode, RowSplitter, Split};
pub use table::{Number, Row, Table, Value};
