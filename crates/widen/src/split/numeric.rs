//! Opt-in numeric interpretation of tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::table::{Number, Value};

/// Plain decimal numbers: optional minus, no leading zeros, optional
/// fraction and exponent.
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").expect("valid regex")
});

/// Whether split tokens are converted to numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericMode {
    /// Every token stays text.
    #[default]
    Off,
    /// Tokens that are entirely a plain decimal number become numbers.
    Convert,
}

impl NumericMode {
    /// Turn a trimmed token into a cell value under this mode.
    pub fn convert(self, token: &str) -> Value {
        match self {
            NumericMode::Off => Value::text(token),
            NumericMode::Convert => parse_number(token)
                .map(Value::Number)
                .unwrap_or_else(|| Value::text(token)),
        }
    }
}

/// Parse a token as a number.
///
/// Accepts `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`. Integers that fit
/// in `i64` become [`Number::Int`], everything else a finite [`Number::Float`].
/// Leading zeros, a leading `+`, thousands or locale separators, `inf` and
/// `nan` are rejected.
pub fn parse_number(token: &str) -> Option<Number> {
    if !NUMBER_PATTERN.is_match(token) {
        return None;
    }

    let is_integral = !token.contains(['.', 'e', 'E']);
    if is_integral {
        if let Ok(i) = token.parse::<i64>() {
            return Some(Number::Int(i));
        }
    }

    token
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Number::Float)
}
