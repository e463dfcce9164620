//! Value types for records and conditions.
//!
//! - [`Record`] is the caller-owned, JSON-shaped data item being filtered.
//! - [`FieldValue`] is a borrowed view of one field, used during evaluation.
//! - [`TypedValue`] is the owned, coerced value stored in a condition.
//! - [`Number`] unifies integer and floating-point comparisons.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value as Json;

use crate::coerce;

/// One structured data item: an ordered mapping from field name to value.
pub type Record = serde_json::Map<String, Json>;

/// Runtime value of a record field, borrowed from the record.
///
/// Returned by [`Queryable::field_value`](crate::Queryable::field_value).
/// A field that is absent is represented by `None` at the call site, not
/// by a variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Field is present but null.
    Null,
    /// Array or object. Never matches a scalar comparison.
    Nested,
}

impl<'a> FieldValue<'a> {
    /// Builds a view over a JSON value.
    pub fn from_json(value: &'a Json) -> Self {
        match value {
            Json::String(s) => FieldValue::String(s),
            Json::Number(n) => FieldValue::Number(Number::from(n)),
            Json::Bool(b) => FieldValue::Bool(*b),
            Json::Null => FieldValue::Null,
            Json::Array(_) | Json::Object(_) => FieldValue::Nested,
        }
    }

    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the numeric reading of this value.
    ///
    /// Numbers are returned as-is. Strings count as numeric when the whole
    /// text is an integer or decimal literal, so `"10"` and `10` compare the
    /// same way.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::String(s) => coerce::numeric(s),
            _ => None,
        }
    }

    /// Returns the text used for string comparison.
    ///
    /// Null and nested values have no text form.
    pub fn to_text(&self) -> Option<Cow<'a, str>> {
        match self {
            FieldValue::String(s) => Some(Cow::Borrowed(s)),
            FieldValue::Number(n) => Some(Cow::Owned(n.to_string())),
            FieldValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            FieldValue::Null | FieldValue::Nested => None,
        }
    }
}

/// Numeric value supporting signed, unsigned and floating-point numbers.
///
/// Integers compare exactly across `I64` and `U64`. Comparisons involving
/// `F64` are made in `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::I64(a), Number::U64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::U64(a), Number::I64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            // Without arbitrary_precision every JSON number fits one of the three.
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// The coerced value of a parsed condition.
///
/// Produced once by the coercer and never re-coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Text, including anything that was quoted in the clause.
    String(String),
    /// Unquoted integer literal.
    Integer(i64),
    /// Unquoted decimal literal.
    Float(f64),
    /// Unquoted `true` / `false`, any case.
    Boolean(bool),
    /// Null. Only reachable through programmatic construction.
    Null,
}

impl TypedValue {
    /// Returns the borrowed view used by the evaluator.
    pub fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            TypedValue::String(s) => FieldValue::String(s),
            TypedValue::Integer(n) => FieldValue::Number(Number::I64(*n)),
            TypedValue::Float(n) => FieldValue::Number(Number::F64(*n)),
            TypedValue::Boolean(b) => FieldValue::Bool(*b),
            TypedValue::Null => FieldValue::Null,
        }
    }
}

impl std::fmt::Display for TypedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypedValue::String(s) if s.contains('"') => write!(f, "'{s}'"),
            TypedValue::String(s) => write!(f, "\"{s}\""),
            TypedValue::Integer(n) => write!(f, "{n}"),
            // Plain digits with a fraction, so the text reads back as a Float.
            TypedValue::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n}.0"),
            TypedValue::Float(n) => write!(f, "{n}"),
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::Null => f.write_str("null"),
        }
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::String(s)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(s.to_string())
    }
}

impl From<i32> for TypedValue {
    fn from(n: i32) -> Self {
        TypedValue::Integer(n as i64)
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Integer(n)
    }
}

impl From<f64> for TypedValue {
    fn from(n: f64) -> Self {
        TypedValue::Float(n)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Boolean(b)
    }
}
