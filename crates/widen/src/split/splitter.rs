//! Cell splitter.

use crate::table::Value;

use super::numeric::NumericMode;
use super::pattern::DelimiterPattern;

/// The selections found in one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Trimmed tokens in the order they appear in the cell.
    pub tokens: Vec<Value>,
    /// Number of delimiter matches plus one. Always equals `tokens.len()`.
    pub count: usize,
}

/// Splits cell values on a delimiter pattern.
pub struct RowSplitter;

impl RowSplitter {
    /// Split one cell.
    ///
    /// A missing cell is a single missing selection, not an empty set, so
    /// the count is never zero. Text cells (including the empty string) are
    /// split on every non-overlapping match and each piece is trimmed.
    /// Numeric cells are split on their rendered text.
    pub fn split(value: &Value, pattern: &DelimiterPattern, numeric: NumericMode) -> Split {
        match value {
            Value::Missing => Split {
                tokens: vec![Value::Missing],
                count: 1,
            },
            Value::Text(text) => Self::split_text(text, pattern, numeric),
            Value::Number(n) => Self::split_text(&n.to_string(), pattern, numeric),
        }
    }

    /// Count the selections in a piece of text.
    pub fn count(text: &str, pattern: &DelimiterPattern) -> usize {
        pattern.match_count(text) + 1
    }

    fn split_text(text: &str, pattern: &DelimiterPattern, numeric: NumericMode) -> Split {
        let tokens: Vec<Value> = pattern
            .regex()
            .split(text)
            .map(|piece| numeric.convert(piece.trim()))
            .collect();
        let count = tokens.len();
        debug_assert_eq!(count, Self::count(text, pattern));

        Split { tokens, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::Delimiter;

    fn comma() -> DelimiterPattern {
        DelimiterPattern::new(&Delimiter::literal(",")).unwrap()
    }

    fn texts(split: &Split) -> Vec<String> {
        split.tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_split_trims_tokens() {
        let split = RowSplitter::split(&Value::from("first, second,  third "), &comma(), NumericMode::Off);
        assert_eq!(split.count, 3);
        assert_eq!(texts(&split), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_split_without_delimiter() {
        let split = RowSplitter::split(&Value::from("fourth"), &comma(), NumericMode::Off);
        assert_eq!(split.count, 1);
        assert_eq!(split.tokens, vec![Value::from("fourth")]);
    }

    #[test]
    fn test_split_missing() {
        let split = RowSplitter::split(&Value::Missing, &comma(), NumericMode::Convert);
        assert_eq!(split.count, 1);
        assert_eq!(split.tokens, vec![Value::Missing]);
    }

    #[test]
    fn test_split_empty_string() {
        let split = RowSplitter::split(&Value::from(""), &comma(), NumericMode::Off);
        assert_eq!(split.count, 1);
        assert_eq!(split.tokens, vec![Value::text("")]);
    }

    #[test]
    fn test_split_keeps_empty_tokens() {
        let split = RowSplitter::split(&Value::from("a,,b,"), &comma(), NumericMode::Off);
        assert_eq!(split.count, 4);
        assert_eq!(texts(&split), vec!["a", "", "b", ""]);
        assert!(split.tokens.iter().all(|t| !t.is_missing()));
    }

    #[test]
    fn test_split_alternation() {
        let pattern = DelimiterPattern::new(&Delimiter::any_of([",", " ", "-"])).unwrap();
        let split = RowSplitter::split(&Value::from("red,green blue-teal"), &pattern, NumericMode::Off);
        assert_eq!(texts(&split), vec!["red", "green", "blue", "teal"]);
    }

    #[test]
    fn test_split_numeric_conversion_is_per_token() {
        let split = RowSplitter::split(&Value::from("1, two, 3.5"), &comma(), NumericMode::Convert);
        assert_eq!(
            split.tokens,
            vec![Value::from(1i64), Value::from("two"), Value::from(3.5)]
        );
    }

    #[test]
    fn test_split_numeric_cell() {
        let split = RowSplitter::split(&Value::from(12i64), &comma(), NumericMode::Convert);
        assert_eq!(split.tokens, vec![Value::from(12i64)]);

        let split = RowSplitter::split(&Value::from(12i64), &comma(), NumericMode::Off);
        assert_eq!(split.tokens, vec![Value::from("12")]);
    }

    #[test]
    fn test_count() {
        assert_eq!(RowSplitter::count("a,b,c", &comma()), 3);
        assert_eq!(RowSplitter::count("", &comma()), 1);
    }
}
