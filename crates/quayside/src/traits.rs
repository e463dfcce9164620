//! Field access for queryable items.
//!
//! The [`Queryable`] trait is the seam between the query engine and the data
//! it filters. It is implemented for [`Record`] and for JSON values, and can be
//! implemented by hand for any struct.

use serde_json::Value as Json;

use crate::value::{FieldValue, Record};

/// Trait for items that can be filtered by a [`Query`](crate::Query).
///
/// # Manual Implementation
///
/// ```
/// use quayside::{FieldValue, Number, Query, Queryable};
///
/// struct Vessel {
///     name: String,
///     length: u32,
/// }
///
/// impl Queryable for Vessel {
///     fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
///         match field {
///             "name" => Some(FieldValue::String(&self.name)),
///             "length" => Some(FieldValue::Number(Number::U64(self.length as u64))),
///             _ => None,
///         }
///     }
/// }
///
/// let fleet = vec![
///     Vessel { name: "Aurora".into(), length: 120 },
///     Vessel { name: "Brine".into(), length: 80 },
/// ];
/// let query: Query = "WHERE length > 100".parse().unwrap();
/// let hits = query.filter(&fleet);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Aurora");
/// ```
pub trait Queryable {
    /// Returns the value of a field, or `None` if the item has no such field.
    ///
    /// A field that exists but holds null is `Some(FieldValue::Null)`.
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>>;
}

impl Queryable for Record {
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        self.get(field).map(FieldValue::from_json)
    }
}

/// Only JSON objects have fields; any other JSON value matches nothing.
impl Queryable for Json {
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        self.as_object().and_then(|map| map.field_value(field))
    }
}

impl<T: Queryable + ?Sized> Queryable for &T {
    fn field_value(&self, field: &str) -> Option<FieldValue<'_>> {
        (**self).field_value(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_field_access() {
        let value = json!({"name": "Aurora", "owner": null});
        let record = value.as_object().unwrap();
        assert_eq!(record.field_value("name"), Some(FieldValue::String("Aurora")));
        assert_eq!(record.field_value("owner"), Some(FieldValue::Null));
        assert_eq!(record.field_value("missing"), None);
    }

    #[test]
    fn json_non_objects_have_no_fields() {
        assert_eq!(json!([1, 2]).field_value("0"), None);
        assert_eq!(json!("text").field_value("len"), None);
        assert_eq!(
            json!({"a": true}).field_value("a"),
            Some(FieldValue::Bool(true))
        );
    }
}
