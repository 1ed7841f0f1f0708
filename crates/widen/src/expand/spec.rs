//! Per-column expansion requests.

use serde::{Deserialize, Serialize};

use crate::split::{Delimiter, NumericMode};

/// Describes how one multi-response column should be widened.
///
/// ```
/// use widen::{Delimiter, MultiValueFieldSpec};
///
/// let spec = MultiValueFieldSpec::new("colours", Delimiter::any_of([",", ";"]))
///     .keep_source()
///     .with_count();
/// assert!(!spec.remove_source);
/// assert!(spec.emit_count);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiValueFieldSpec {
    /// Column holding the delimited selections.
    pub source_column: String,

    /// Separator between selections.
    pub delimiter: Delimiter,

    /// Drop the source column after widening.
    #[serde(default = "default_remove_source")]
    pub remove_source: bool,

    /// Add a `<source>_nselected` column with the per-row selection count.
    #[serde(default)]
    pub emit_count: bool,

    /// Numeric interpretation of the split tokens.
    #[serde(default)]
    pub numeric: NumericMode,
}

fn default_remove_source() -> bool {
    true
}

impl MultiValueFieldSpec {
    /// Create a spec that drops the source column, emits no count column and
    /// keeps tokens as text.
    pub fn new(source_column: impl Into<String>, delimiter: Delimiter) -> Self {
        Self {
            source_column: source_column.into(),
            delimiter,
            remove_source: true,
            emit_count: false,
            numeric: NumericMode::Off,
        }
    }

    /// Retain the source column in front of the generated columns.
    pub fn keep_source(mut self) -> Self {
        self.remove_source = false;
        self
    }

    /// Emit the selection count column.
    pub fn with_count(mut self) -> Self {
        self.emit_count = true;
        self
    }

    /// Convert numeric-looking tokens to numbers.
    pub fn convert_numeric(mut self) -> Self {
        self.numeric = NumericMode::Convert;
        self
    }
}
