//! Widening multi-response columns into one column per selection.
//!
//! [`expand`] handles a single source column and is a pure function of its
//! inputs. [`ColumnExpander::apply`] folds a list of specs over a table, each
//! step seeing the columns produced by the steps before it.

mod engine;
mod plan;
mod result;
mod spec;

pub use engine::{ColumnExpander, expand, expand_with_report};
pub use plan::{ExpansionPlan, count_column, plan, selection_column};
pub use result::{BatchError, ExpandResult, ExpansionReport};
pub use spec::MultiValueFieldSpec;
