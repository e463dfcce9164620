//! Conditions and their evaluation against records.
//!
//! A [`Condition`] is a single `field OP value` predicate. Evaluation is
//! total: anything that cannot be compared is a non-match, never an error.

use crate::op::Operator;
use crate::traits::Queryable;
use crate::value::{FieldValue, Number, TypedValue};

/// A single parsed predicate.
///
/// # Example
///
/// ```
/// use quayside::{Condition, Operator, Record};
/// use serde_json::json;
///
/// let cond = Condition::new("length", Operator::Gt, 100);
/// let record: Record = json!({"length": 120}).as_object().unwrap().clone();
/// assert!(cond.matches(&record));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator.
    pub operator: Operator,
    /// The value to compare against.
    pub value: TypedValue,
}

impl Condition {
    /// Creates a new condition.
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<TypedValue>) -> Self {
        Condition {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Evaluates this condition against an item.
    ///
    /// An item without the field never matches, whatever the operator.
    /// That includes `!=`.
    pub fn matches<T: Queryable + ?Sized>(&self, item: &T) -> bool {
        match item.field_value(&self.field) {
            Some(actual) => self.matches_value(&actual),
            None => false,
        }
    }

    /// Evaluates this condition against a field value that is present.
    pub fn matches_value(&self, actual: &FieldValue<'_>) -> bool {
        let expected = self.value.as_field_value();
        let op = self.operator;

        if let Some((a, b)) = numeric_pair(actual, &expected) {
            return match a.compare(b) {
                Some(ordering) => op.eval_ordering(ordering),
                None => false, // NaN
            };
        }

        match (actual, &expected) {
            (FieldValue::Nested, _) | (_, FieldValue::Nested) => false,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => op.eval_equality(a == b),
            (FieldValue::Null, _) | (_, FieldValue::Null) => {
                op.eval_equality(actual.is_null() && expected.is_null())
            }
            _ => match (actual.to_text(), expected.to_text()) {
                (Some(a), Some(b)) => op.eval_ordering(a.cmp(&b)),
                _ => false,
            },
        }
    }
}

/// Numeric readings of both sides, when the comparison is numeric.
///
/// At least one side must be a real number; the other may be a numeric
/// string. Two strings always compare as text, so `'007'` is not `"7"`.
fn numeric_pair(
    actual: &FieldValue<'_>,
    expected: &FieldValue<'_>,
) -> Option<(Number, Number)> {
    if let (FieldValue::String(_), FieldValue::String(_)) = (actual, expected) {
        return None;
    }
    Some((actual.as_number()?, expected.as_number()?))
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: i64) -> FieldValue<'static> {
        FieldValue::Number(Number::I64(n))
    }

    #[test]
    fn number_comparisons() {
        let five = num(5);
        assert!(Condition::new("f", Operator::Eq, 5).matches_value(&five));
        assert!(Condition::new("f", Operator::Ne, 10).matches_value(&five));
        assert!(Condition::new("f", Operator::Lt, 10).matches_value(&five));
        assert!(Condition::new("f", Operator::Gt, 3).matches_value(&five));
        assert!(Condition::new("f", Operator::Le, 5).matches_value(&five));
        assert!(Condition::new("f", Operator::Ge, 5).matches_value(&five));
        assert!(!Condition::new("f", Operator::Gt, 5).matches_value(&five));
    }

    #[test]
    fn mixed_integer_and_float() {
        let cond = Condition::new("f", Operator::Eq, 10.0);
        assert!(cond.matches_value(&num(10)));
        let cond = Condition::new("f", Operator::Lt, 10.5);
        assert!(cond.matches_value(&num(10)));
    }

    #[test]
    fn quoted_numeric_value_compares_numerically() {
        let quoted = Condition::new("f", Operator::Lt, "10");
        let unquoted = Condition::new("f", Operator::Lt, 10);
        for n in [2, 9, 10, 11, 100] {
            assert_eq!(
                quoted.matches_value(&num(n)),
                unquoted.matches_value(&num(n)),
                "disagreement at {n}"
            );
        }
        // Lexicographically "9" > "10", numerically it is not.
        assert!(quoted.matches_value(&num(9)));
    }

    #[test]
    fn numeric_string_field_compares_numerically() {
        let cond = Condition::new("f", Operator::Gt, 100);
        assert!(cond.matches_value(&FieldValue::String("120")));
        assert!(!cond.matches_value(&FieldValue::String("80")));
    }

    #[test]
    fn numeric_looking_strings_compare_as_text() {
        let cond = Condition::new("f", Operator::Eq, "007");
        assert!(cond.matches_value(&FieldValue::String("007")));
        assert!(!cond.matches_value(&FieldValue::String("7")));
        assert!(!cond.matches_value(&FieldValue::String("7.0")));

        // "9" sorts after "10" as text.
        let cond = Condition::new("f", Operator::Gt, "10");
        assert!(cond.matches_value(&FieldValue::String("9")));
    }

    #[test]
    fn string_comparisons() {
        let cond = Condition::new("f", Operator::Eq, "active");
        assert!(cond.matches_value(&FieldValue::String("active")));
        assert!(!cond.matches_value(&FieldValue::String("Active")));

        let cond = Condition::new("f", Operator::Lt, "b");
        assert!(cond.matches_value(&FieldValue::String("apple")));
        assert!(!cond.matches_value(&FieldValue::String("banana")));
        assert!(!cond.matches_value(&FieldValue::String("b")));
    }

    #[test]
    fn non_numeric_text_against_number_uses_text_order() {
        // "unknown" is not a number, so "unknown" vs "2000" is a text comparison.
        let cond = Condition::new("f", Operator::Ge, 2000);
        assert!(cond.matches_value(&FieldValue::String("unknown")));
        assert!(!cond.matches_value(&FieldValue::String("")));
    }

    #[test]
    fn string_value_against_number_field() {
        let cond = Condition::new("f", Operator::Eq, "five");
        assert!(!cond.matches_value(&num(5)));
        let cond = Condition::new("f", Operator::Ne, "five");
        assert!(cond.matches_value(&num(5)));
    }

    #[test]
    fn booleans_support_equality_only() {
        let t = FieldValue::Bool(true);
        assert!(Condition::new("f", Operator::Eq, true).matches_value(&t));
        assert!(Condition::new("f", Operator::Ne, false).matches_value(&t));
        assert!(!Condition::new("f", Operator::Gt, false).matches_value(&t));
        assert!(!Condition::new("f", Operator::Le, true).matches_value(&t));
    }

    #[test]
    fn boolean_field_against_quoted_text() {
        let cond = Condition::new("f", Operator::Eq, "true");
        assert!(cond.matches_value(&FieldValue::Bool(true)));
    }

    #[test]
    fn null_handling() {
        let null = FieldValue::Null;
        assert!(Condition::new("f", Operator::Eq, TypedValue::Null).matches_value(&null));
        assert!(!Condition::new("f", Operator::Ne, TypedValue::Null).matches_value(&null));
        assert!(!Condition::new("f", Operator::Eq, "x").matches_value(&null));
        assert!(Condition::new("f", Operator::Ne, "x").matches_value(&null));
        assert!(!Condition::new("f", Operator::Lt, TypedValue::Null).matches_value(&null));
        assert!(!Condition::new("f", Operator::Gt, 1).matches_value(&null));
    }

    #[test]
    fn nested_never_matches() {
        for op in Operator::LONGEST_FIRST {
            assert!(!Condition::new("f", op, "x").matches_value(&FieldValue::Nested));
        }
    }

    #[test]
    fn nan_never_matches() {
        let nan = FieldValue::Number(Number::F64(f64::NAN));
        assert!(!Condition::new("f", Operator::Eq, 1).matches_value(&nan));
        assert!(!Condition::new("f", Operator::Ne, 1).matches_value(&nan));
    }

    #[test]
    fn display() {
        assert_eq!(
            Condition::new("name", Operator::Eq, "M.V. Ocean").to_string(),
            "name = \"M.V. Ocean\""
        );
        assert_eq!(Condition::new("len", Operator::Ge, 50).to_string(), "len >= 50");
    }
}
