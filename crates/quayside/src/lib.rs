//! Quayside - WHERE-clause filtering for in-memory record collections.
//!
//! Quayside parses a small predicate language made of single-field
//! comparisons joined by `AND`, and applies it to records held in memory:
//!
//! ```text
//! WHERE Z13_STATUS_CODE = 4 AND BUILDER_GROUP = 'Guoyu Logistics'
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use quayside::Database;
//!
//! let db = Database::from_json_str(r#"[
//!     {"status": "active", "length": 120},
//!     {"status": "active", "length": 80},
//!     {"status": "idle", "length": 150}
//! ]"#).unwrap();
//!
//! let hits = db.query("WHERE status = 'active' AND length > 100").unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0]["length"], 120);
//! ```
//!
//! # Clause Syntax
//!
//! | Part | Form |
//! |------|------|
//! | Field | letters, digits, `_` |
//! | Operator | `=`, `!=`, `<`, `<=`, `>`, `>=` |
//! | Value | `'text'`, `"text"`, `‘text’`, `“text”`, `42`, `-1.5`, `true`, or bare text |
//!
//! Unquoted values are read as integer, decimal or boolean literals when they
//! look like one, and as text otherwise. Quoted values are always text.
//!
//! # Matching Semantics
//!
//! - A record without the field never matches, for every operator including `!=`.
//! - When one side is a number and the other reads as one (a numeric string
//!   included) they are compared numerically. Two strings compare as text.
//! - Booleans and nulls only support `=` and `!=`.
//! - Everything else is compared as text, by byte order.
//! - Nothing fails at evaluation time; incomparable values do not match.

mod coerce;
mod condition;
mod database;
mod error;
mod op;
mod parser;
mod query;
mod traits;
mod value;

// Re-export public API
pub use coerce::{coerce, numeric};
pub use condition::Condition;
pub use database::{clean_js_content, Database};
pub use error::{LoadError, ParseError, Result};
pub use op::Operator;
pub use parser::{parse_condition, split_quotes, QuoteFamily};
pub use query::{split_conditions, strip_where, Query};
pub use traits::Queryable;
pub use value::{FieldValue, Number, Record, TypedValue};
