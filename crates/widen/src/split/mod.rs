//! Splitting a single multi-response cell into selection tokens.

mod numeric;
mod pattern;
mod splitter;

pub use numeric::{NumericMode, parse_number};
pub use pattern::{Delimiter, DelimiterPattern};
pub use splitter::{RowSplitter, Split};
