//! In-memory table model: ordered named columns of dynamically typed cells.

mod data;
mod value;

pub use data::{Row, Table};
pub use value::{Number, Value};
