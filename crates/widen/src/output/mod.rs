//! Rendering tables back to text.

mod writer;

pub use writer::{OutputFormat, Writer, WriterConfig};
