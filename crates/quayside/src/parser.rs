//! Parsing of single conditions.
//!
//! A condition reads `<field> <operator> <value>`. Each part is consumed in
//! turn by a small cursor over the condition text:
//!
//! 1. the field: one or more letters, digits or underscores;
//! 2. the operator: the longest of `!=`, `<=`, `>=`, `=`, `<`, `>`;
//! 3. the value: everything that remains, trimmed. If it is wrapped in a
//!    matching pair of quotes the quotes are dropped and the value is a string.
//!
//! The value always runs to the end of the condition, so periods, hyphens and
//! spaces inside it are kept.

use crate::coerce::coerce;
use crate::condition::Condition;
use crate::error::{ParseError, Result};
use crate::op::Operator;

/// Family a quote character belongs to.
///
/// Straight and typographic quotes of the same family can open and close
/// each other, so `‘Ocean’` and `'Ocean'` read the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteFamily {
    /// `'`, `‘`, `’`
    Single,
    /// `"`, `“`, `”`
    Double,
}

impl QuoteFamily {
    /// Returns the family of `c`, if it is a quote character.
    pub fn of(c: char) -> Option<QuoteFamily> {
        match c {
            '\'' | '\u{2018}' | '\u{2019}' => Some(QuoteFamily::Single),
            '"' | '\u{201C}' | '\u{201D}' => Some(QuoteFamily::Double),
            _ => None,
        }
    }
}

/// Parses one condition into a [`Condition`].
///
/// # Errors
///
/// Returns [`ParseError::MalformedCondition`] with the original text when the
/// field or operator is missing or when there is no value.
///
/// # Example
///
/// ```
/// use quayside::{parse_condition, Operator, TypedValue};
///
/// let cond = parse_condition("name = \"M.V. Ocean-Star\"").unwrap();
/// assert_eq!(cond.field, "name");
/// assert_eq!(cond.operator, Operator::Eq);
/// assert_eq!(cond.value, TypedValue::String("M.V. Ocean-Star".into()));
/// ```
pub fn parse_condition(text: &str) -> Result<Condition> {
    let malformed = || ParseError::MalformedCondition(text.to_string());

    let mut cursor = Cursor::new(text.trim());
    let field = cursor.field().ok_or_else(malformed)?;
    cursor.skip_whitespace();
    let operator = cursor.operator().ok_or_else(malformed)?;
    let (token, quoted) = split_quotes(cursor.rest().trim());
    if token.is_empty() && !quoted {
        return Err(malformed());
    }

    Ok(Condition {
        field: field.to_string(),
        operator,
        value: coerce(token, quoted),
    })
}

/// Removes a matching pair of surrounding quotes.
///
/// Returns the inner text and `true` when `raw` is quoted, or `raw` itself and
/// `false` otherwise. A quote of the same family inside the value means the
/// value is not a single quoted string, and it is returned verbatim.
pub fn split_quotes(raw: &str) -> (&str, bool) {
    let mut chars = raw.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return (raw, false);
    };

    match (QuoteFamily::of(first), QuoteFamily::of(last)) {
        (Some(open), Some(close)) if open == close => {
            let inner = &raw[first.len_utf8()..raw.len() - last.len_utf8()];
            if inner.chars().any(|c| QuoteFamily::of(c) == Some(open)) {
                (raw, false)
            } else {
                (inner, true)
            }
        }
        _ => (raw, false),
    }
}

/// Forward-only cursor over condition text.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn field(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn operator(&mut self) -> Option<Operator> {
        let (op, len) = Operator::match_prefix(self.rest())?;
        self.pos += len;
        Some(op)
    }
}
