//! Loading tables from delimited text.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
