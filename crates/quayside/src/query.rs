//! Query parsing and execution.
//!
//! A [`Query`] is an ordered list of conditions joined by an implicit AND. It
//! is usually parsed from a clause such as
//! `WHERE status = 'active' AND length > 100`, then run against a slice of
//! records.

use std::str::FromStr;

use log::debug;

use crate::condition::Condition;
use crate::error::Result;
use crate::op::Operator;
use crate::parser::{parse_condition, QuoteFamily};
use crate::traits::Queryable;
use crate::value::TypedValue;

/// A conjunction of conditions.
///
/// An item matches when every condition matches it. A query without
/// conditions matches everything.
///
/// # Example
///
/// ```
/// use quayside::{Query, Record};
/// use serde_json::json;
///
/// let records: Vec<Record> = [
///     json!({"status": "active", "length": 120}),
///     json!({"status": "active", "length": 80}),
///     json!({"status": "idle", "length": 150}),
/// ]
/// .into_iter()
/// .map(|v| v.as_object().unwrap().clone())
/// .collect();
///
/// let query = Query::parse("WHERE status = 'active' AND length > 100").unwrap();
/// let hits = query.filter(&records);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0]["length"], 120);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conditions: Vec<Condition>,
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query matches all items.
    pub fn new() -> Self {
        Query::default()
    }

    /// Parses a clause into a query.
    ///
    /// A leading `WHERE` (any case) is optional. Conditions are separated by
    /// `AND` (any case) with whitespace on both sides; an `AND` inside a
    /// quoted value does not split. An empty clause yields an empty query.
    ///
    /// # Errors
    ///
    /// Fails with [`ParseError::MalformedCondition`](crate::ParseError::MalformedCondition)
    /// on the first condition that does not parse. No partial query is returned.
    pub fn parse(raw: &str) -> Result<Self> {
        let clause = strip_where(raw);
        if clause.is_empty() {
            debug!("empty clause, query matches every record");
            return Ok(Query::new());
        }

        let conditions = split_conditions(clause)
            .into_iter()
            .map(parse_condition)
            .collect::<Result<Vec<_>>>()?;
        debug!("parsed {} condition(s) from {:?}", conditions.len(), raw);

        Ok(Query { conditions })
    }

    /// Adds a condition.
    pub fn and(mut self, field: &str, operator: Operator, value: impl Into<TypedValue>) -> Self {
        self.conditions.push(Condition::new(field, operator, value));
        self
    }

    /// Adds an already built condition.
    pub fn and_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Returns the conditions, in clause order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Returns `true` if this query has no conditions (matches everything).
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Tests if a single item matches every condition.
    ///
    /// Stops at the first condition that fails.
    pub fn matches<T: Queryable + ?Sized>(&self, item: &T) -> bool {
        self.conditions.iter().all(|condition| condition.matches(item))
    }

    /// Filters a slice, returning references to matching items in their
    /// original order.
    pub fn filter<'a, T: Queryable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Filters and clones matching items.
    pub fn filter_cloned<T: Queryable + Clone>(&self, items: &[T]) -> Vec<T> {
        self.filter(items).into_iter().cloned().collect()
    }

    /// Counts the number of matching items.
    pub fn count<T: Queryable>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    /// Returns `true` if any item matches.
    pub fn any<T: Queryable>(&self, items: &[T]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Finds the first matching item.
    pub fn find<'a, T: Queryable>(&self, items: &'a [T]) -> Option<&'a T> {
        items.iter().find(|item| self.matches(*item))
    }

    /// Finds the first matching item and returns its index.
    pub fn position<T: Queryable>(&self, items: &[T]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }
}

impl FromStr for Query {
    type Err = crate::ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Query::parse(s)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}

/// Removes a leading `WHERE` keyword and surrounding whitespace.
///
/// The keyword only counts when followed by whitespace or the end of input,
/// so a field named `WHEREABOUTS` is left alone.
pub fn strip_where(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.get(..5) {
        Some(head) if head.eq_ignore_ascii_case("WHERE") => {
            let rest = &trimmed[5..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim()
            } else {
                trimmed
            }
        }
        _ => trimmed,
    }
}

/// Splits a clause on `AND` separators that sit outside quoted spans.
///
/// The separator is `AND` in any case with whitespace on both sides. Each
/// returned part is trimmed. A quote only opens a span where a value
/// starts, right after an operator, so the apostrophe in `O'Brien` is plain
/// text. A span that never closes is treated as plain text too.
///
/// ```
/// use quayside::split_conditions;
///
/// assert_eq!(
///     split_conditions("a = 1 and name = 'Salt AND Pepper'"),
///     vec!["a = 1", "name = 'Salt AND Pepper'"],
/// );
/// assert_eq!(
///     split_conditions("owner = O'Brien AND length > 100"),
///     vec!["owner = O'Brien", "length > 100"],
/// );
/// ```
pub fn split_conditions(clause: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = clause.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;
    // Family and position of the quote that opened the current span.
    let mut open: Option<(QuoteFamily, usize)> = None;
    let mut k = 0;

    loop {
        while k < chars.len() {
            let c = chars[k].1;

            if let Some((family, _)) = open {
                if QuoteFamily::of(c) == Some(family) {
                    open = None;
                }
            } else if let Some(family) =
                QuoteFamily::of(c).filter(|_| starts_value(&chars[..k]))
            {
                open = Some((family, k));
            } else if c.is_whitespace() && is_and_separator(&chars[k..]) {
                parts.push(clause[start..chars[k].0].trim());
                start = chars[k + 4].0;
                k += 4;
                continue;
            }

            k += 1;
        }

        // Unclosed: rescan past the opening quote as if it were text.
        match open.take() {
            Some((_, at)) => k = at + 1,
            None => break,
        }
    }

    parts.push(clause[start..].trim());
    parts
}

/// Checks whether the last non-whitespace character before a position ends
/// an operator, meaning a value starts there.
fn starts_value(before: &[(usize, char)]) -> bool {
    matches!(
        before.iter().rev().map(|&(_, c)| c).find(|c| !c.is_whitespace()),
        Some('=' | '<' | '>')
    )
}

/// Checks for `<ws>AND<ws>` at the start of `window`.
fn is_and_separator(window: &[(usize, char)]) -> bool {
    match window {
        [(_, lead), (_, a), (_, n), (_, d), (_, trail), ..] => {
            lead.is_whitespace()
                && a.eq_ignore_ascii_case(&'a')
                && n.eq_ignore_ascii_case(&'n')
                && d.eq_ignore_ascii_case(&'d')
                && trail.is_whitespace()
        }
        _ => false,
    }
}
