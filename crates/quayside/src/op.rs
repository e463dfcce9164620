//! Comparison operators for conditions.
//!
//! The [`Operator`] enum covers the six comparisons a condition can make.
//! Operators are written in clauses with their symbolic form (`=`, `!=`,
//! `<`, `<=`, `>`, `>=`).

use std::cmp::Ordering;

/// Comparison operator for a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (`=`).
    Eq,
    /// Not equal (`!=`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl Operator {
    /// Every operator in the order the parser tries them.
    ///
    /// Two-character symbols come first so `<=` is never read as `<`
    /// followed by a stray `=`.
    pub const LONGEST_FIRST: [Operator; 6] = [
        Operator::Ne,
        Operator::Le,
        Operator::Ge,
        Operator::Eq,
        Operator::Lt,
        Operator::Gt,
    ];

    /// Returns the symbol used for this operator in clause text.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    /// Matches the operator at the start of `input`, longest symbol first.
    ///
    /// Returns the operator and the number of bytes it occupies.
    pub fn match_prefix(input: &str) -> Option<(Operator, usize)> {
        Self::LONGEST_FIRST
            .iter()
            .find(|op| input.starts_with(op.symbol()))
            .map(|op| (*op, op.symbol().len()))
    }

    /// Evaluates the operator given the ordering of `actual` relative to
    /// the condition value.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
        }
    }

    /// Evaluates an equality-only comparison.
    ///
    /// Ordering operators have no meaning for values that are merely
    /// equal or not, so they never match.
    pub fn eval_equality(self, equal: bool) -> bool {
        match self {
            Operator::Eq => equal,
            Operator::Ne => !equal,
            _ => false,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
