//! Delimiter patterns.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WidenError};

/// How selections inside a cell are separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// A single literal separator, e.g. `","`.
    Literal(String),
    /// Any of several literal separators, e.g. comma or space or hyphen.
    AnyOf(Vec<String>),
    /// A regular expression.
    Regex(String),
}

impl Delimiter {
    /// Create a literal delimiter.
    pub fn literal(s: impl Into<String>) -> Self {
        Delimiter::Literal(s.into())
    }

    /// Create an alternation of literal delimiters.
    pub fn any_of<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Delimiter::AnyOf(items.into_iter().map(Into::into).collect())
    }

    /// Create a regex delimiter.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Delimiter::Regex(pattern.into())
    }

    /// Compile into a pattern usable for splitting.
    ///
    /// `column` is only used to label errors.
    pub fn compile(&self, column: &str) -> Result<DelimiterPattern> {
        let source = match self {
            Delimiter::Literal(s) => {
                if s.is_empty() {
                    return Err(WidenError::invalid_spec(column, "delimiter is empty"));
                }
                regex::escape(s)
            }
            Delimiter::AnyOf(items) => {
                if items.is_empty() {
                    return Err(WidenError::invalid_spec(column, "delimiter list is empty"));
                }
                if items.iter().any(|s| s.is_empty()) {
                    return Err(WidenError::invalid_spec(
                        column,
                        "delimiter list contains an empty separator",
                    ));
                }
                // Leftmost-first alternation: longer literals must come first
                // so that ", " is not consumed as "," followed by " ".
                let mut sorted: Vec<&String> = items.iter().collect();
                sorted.sort_by(|a, b| b.len().cmp(&a.len()));
                sorted
                    .into_iter()
                    .map(|s| regex::escape(s))
                    .collect::<Vec<_>>()
                    .join("|")
            }
            Delimiter::Regex(pattern) => {
                if pattern.is_empty() {
                    return Err(WidenError::invalid_spec(column, "delimiter is empty"));
                }
                pattern.clone()
            }
        };

        let regex = Regex::new(&source).map_err(|e| {
            WidenError::invalid_spec(column, format!("delimiter does not compile: {}", e))
        })?;

        // No zero-width matches, anywhere in a cell.
        let hir = regex_syntax::Parser::new().parse(&source).map_err(|e| {
            WidenError::invalid_spec(column, format!("delimiter does not compile: {}", e))
        })?;
        if hir.properties().minimum_len() == Some(0) {
            return Err(WidenError::invalid_spec(
                column,
                format!("delimiter '{}' can match an empty string", source),
            ));
        }

        Ok(DelimiterPattern {
            regex,
            delimiter: self.clone(),
        })
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Literal(s) => write!(f, "{:?}", s),
            Delimiter::AnyOf(items) => {
                let quoted: Vec<String> = items.iter().map(|s| format!("{:?}", s)).collect();
                write!(f, "any of [{}]", quoted.join(", "))
            }
            Delimiter::Regex(p) => write!(f, "/{}/", p),
        }
    }
}

/// A compiled delimiter. Every match consumes at least one character.
#[derive(Debug, Clone)]
pub struct DelimiterPattern {
    regex: Regex,
    delimiter: Delimiter,
}

impl DelimiterPattern {
    /// Compile a delimiter that is not tied to any column.
    pub fn new(delimiter: &Delimiter) -> Result<Self> {
        delimiter.compile("<delimiter>")
    }

    /// The delimiter this pattern was compiled from.
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// The compiled regular expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Count non-overlapping occurrences in `text`.
    pub fn match_count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// A literal that can stand in for this pattern when rejoining tokens.
    ///
    /// Only single literals have an unambiguous representative.
    pub fn representative(&self) -> Option<&str> {
        match &self.delimiter {
            Delimiter::Literal(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_is_escaped() {
        let pattern = DelimiterPattern::new(&Delimiter::literal("|")).unwrap();
        assert_eq!(pattern.match_count("a|b|c"), 2);
        assert_eq!(pattern.representative(), Some("|"));
    }

    #[test]
    fn test_any_of_prefers_longer_separator() {
        let pattern = DelimiterPattern::new(&Delimiter::any_of([",", ", "])).unwrap();
        assert_eq!(pattern.match_count("a, b,c"), 2);
        assert_eq!(pattern.representative(), None);
    }

    #[test]
    fn test_any_of_alternation() {
        let pattern = DelimiterPattern::new(&Delimiter::any_of([",", " ", "-"])).unwrap();
        assert_eq!(pattern.match_count("a,b c-d"), 3);
    }

    #[test]
    fn test_empty_delimiters_rejected() {
        for delimiter in [
            Delimiter::literal(""),
            Delimiter::any_of(Vec::<String>::new()),
            Delimiter::any_of([",", ""]),
            Delimiter::regex(""),
        ] {
            let err = delimiter.compile("q1").unwrap_err();
            assert!(matches!(err, WidenError::InvalidSpec { ref column, .. } if column == "q1"));
        }
    }

    #[test]
    fn test_empty_matching_regex_rejected() {
        assert!(Delimiter::regex(",*").compile("q1").is_err());
        assert!(Delimiter::regex(",+").compile("q1").is_ok());
    }

    #[test]
    fn test_zero_width_regex_rejected() {
        for pattern in [r"\b", "^", "$", r"(?:,|\b)"] {
            let err = Delimiter::regex(pattern).compile("q1").unwrap_err();
            assert!(
                matches!(err, WidenError::InvalidSpec { ref message, .. } if message.contains("empty string")),
                "{pattern}: {err}"
            );
        }
        assert!(Delimiter::regex(r"\s*,\s*").compile("q1").is_ok());
        assert!(Delimiter::regex(r"\b,").compile("q1").is_ok());
    }

    #[test]
    fn test_bad_regex_rejected() {
        let err = Delimiter::regex("(").compile("q1").unwrap_err();
        assert!(err.to_string().contains("does not compile"));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Delimiter::any_of([",", ";"])).unwrap();
        assert_eq!(json, r#"{"any_of":[",",";"]}"#);
        let back: Delimiter = serde_json::from_str(r#"{"literal":"|"}"#).unwrap();
        assert_eq!(back, Delimiter::literal("|"));
    }
}
