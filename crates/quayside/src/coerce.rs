//! Coercion of raw clause tokens into typed values.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::{Number, TypedValue};

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").expect("valid regex"));
static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+\.[0-9]+$").expect("valid regex"));

/// Coerces a raw value token into a [`TypedValue`].
///
/// `token` has already had its quotes removed. A quoted token is always a
/// string. Unquoted tokens are tried as integer, then decimal, then boolean
/// literal, and fall back to a string. Coercion cannot fail.
///
/// # Example
///
/// ```
/// use quayside::{coerce, TypedValue};
///
/// assert_eq!(coerce("42", false), TypedValue::Integer(42));
/// assert_eq!(coerce("42", true), TypedValue::String("42".into()));
/// assert_eq!(coerce("M.V. Ocean-Star", false), TypedValue::String("M.V. Ocean-Star".into()));
/// ```
pub fn coerce(token: &str, quoted: bool) -> TypedValue {
    if quoted {
        return TypedValue::String(token.to_string());
    }

    if let Some(number) = numeric(token) {
        return match number {
            Number::I64(n) => TypedValue::Integer(n),
            Number::U64(n) => TypedValue::Float(n as f64),
            Number::F64(n) => TypedValue::Float(n),
        };
    }

    if token.eq_ignore_ascii_case("true") {
        TypedValue::Boolean(true)
    } else if token.eq_ignore_ascii_case("false") {
        TypedValue::Boolean(false)
    } else {
        TypedValue::String(token.to_string())
    }
}

/// Reads `text` as a number if the whole of it is an integer or decimal literal.
///
/// Integer literals too large for `i64` come back as `F64`.
pub fn numeric(text: &str) -> Option<Number> {
    if INTEGER.is_match(text) {
        match text.parse::<i64>() {
            Ok(n) => Some(Number::I64(n)),
            Err(_) => text.parse::<f64>().ok().map(Number::F64),
        }
    } else if FLOAT.is_match(text) {
        text.parse::<f64>().ok().map(Number::F64)
    } else {
        None
    }
}
