//! Field access on records of arbitrary shape.
//!
//! The engine never inspects records itself: it asks a field accessor for the
//! value behind a field name. An accessor answers with one of three outcomes:
//!
//! - `Ok(Some(value))` the field exists (its value may be [`Value::Null`]),
//! - `Ok(None)` the record has no such field, which makes the rule a soft
//!   non-match,
//! - `Err(_)` the path is malformed or extraction failed, which aborts the
//!   whole pass.
//!
//! Accessors come from the [`FieldAccessor`] trait (implemented by hand or
//! with `#[derive(FieldAccessor)]`), from a closure, or from [`serialized`],
//! which goes through `serde` and needs nothing from the record type beyond
//! `Serialize`.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::value::Value;

/// Trait for records that can be filtered.
///
/// Usually derived with `#[derive(FieldAccessor)]` (feature `derive`), but
/// can be implemented manually.
///
/// # Manual Implementation
///
/// ```
/// use sieve::{FieldAccessor, Result, ToValue, Value};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// impl FieldAccessor for Task {
///     fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
///         Ok(match field {
///             "name" => Some(self.name.to_value()),
///             "priority" => Some(self.priority.to_value()),
///             _ => None,
///         })
///     }
/// }
/// ```
pub trait FieldAccessor {
    /// Returns the value of `field`, or `None` if the record has no such field.
    ///
    /// Dotted names (`"owner.name"`) address nested records.
    fn field_value(&self, field: &str) -> Result<Option<Value<'_>>>;

    /// Value of the record itself when a rule addresses it as a whole.
    ///
    /// Records are not comparable, so this is [`Value::Unsupported`] unless
    /// the record is absent.
    fn self_value(&self) -> Value<'_> {
        Value::Unsupported
    }

    /// Whether `field` names a field of this type, answered without a
    /// record.
    ///
    /// Lets an absent optional record tell a null field apart from one that
    /// does not exist. The default accepts every well-formed path.
    fn has_field(field: &str) -> Result<bool>
    where
        Self: Sized,
    {
        split_path(field)?;
        Ok(true)
    }

    /// Returns a function usable with the `_with` processor methods.
    fn accessor<'a>(item: &'a Self, field: &str) -> Result<Option<Value<'a>>>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for &T {
    fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
        (**self).field_value(field)
    }

    fn self_value(&self) -> Value<'_> {
        (**self).self_value()
    }
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for Box<T> {
    fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
        (**self).field_value(field)
    }

    fn self_value(&self) -> Value<'_> {
        (**self).self_value()
    }
}

/// An absent nested record is null, and so is every field it would have.
impl<T: FieldAccessor> FieldAccessor for Option<T> {
    fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
        match self {
            Some(inner) => inner.field_value(field),
            None if T::has_field(field)? => Ok(Some(Value::Null)),
            None => Ok(None),
        }
    }

    fn self_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.self_value(),
            None => Value::Null,
        }
    }

    fn has_field(field: &str) -> Result<bool> {
        T::has_field(field)
    }
}

impl FieldAccessor for serde_json::Value {
    fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
        lookup(self, field)
    }

    fn self_value(&self) -> Value<'_> {
        Value::from(self)
    }
}

/// Splits a field path into its first segment and the remainder.
///
/// Fails with [`Error::MalformedPath`] if any segment is empty.
///
/// ```
/// assert_eq!(sieve::split_path("owner.name").unwrap(), ("owner", Some("name")));
/// assert_eq!(sieve::split_path("id").unwrap(), ("id", None));
/// assert!(sieve::split_path("owner..name").is_err());
/// ```
pub fn split_path(path: &str) -> Result<(&str, Option<&str>)> {
    if path.split('.').any(str::is_empty) {
        return Err(Error::MalformedPath {
            path: path.to_string(),
        });
    }

    Ok(match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    })
}

/// Resolves a dotted path inside a JSON document.
///
/// Only objects are traversed; any other intermediate value means the field
/// does not exist.
pub fn lookup<'a>(doc: &'a serde_json::Value, path: &str) -> Result<Option<Value<'a>>> {
    let (head, rest) = split_path(path)?;

    let Some(child) = doc.as_object().and_then(|entries| entries.get(head)) else {
        return Ok(None);
    };

    match rest {
        Some(rest) => lookup(child, rest),
        None => Ok(Some(Value::from(child))),
    }
}

/// Field accessor for any `Serialize` record.
///
/// The record is serialized to JSON and the field resolved with [`lookup`],
/// so field names follow the record's serde names (`#[serde(rename)]` and
/// friends apply). Serialization happens on every call; prefer a derived
/// accessor on hot paths.
pub fn serialized<'a, T>(item: &'a T, field: &str) -> Result<Option<Value<'a>>>
where
    T: Serialize + ?Sized,
{
    let doc = serde_json::to_value(item).map_err(|e| Error::Extraction {
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    Ok(lookup(&doc, field)?.map(Value::into_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, ToValue};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn split_path_rejects_empty_segments() {
        for path in ["", ".", ".a", "a.", "a..b"] {
            assert!(
                matches!(split_path(path), Err(Error::MalformedPath { .. })),
                "{path:?}"
            );
        }
    }

    #[test]
    fn split_path_nested() {
        assert_eq!(split_path("a.b.c").unwrap(), ("a", Some("b.c")));
    }

    #[test]
    fn lookup_distinguishes_null_from_missing() {
        let doc = json!({"a": null, "b": {"c": 3}});
        assert_eq!(lookup(&doc, "a").unwrap(), Some(Value::Null));
        assert_eq!(lookup(&doc, "z").unwrap(), None);
        assert_eq!(
            lookup(&doc, "b.c").unwrap(),
            Some(Value::Number(Number::I64(3)))
        );
        assert_eq!(lookup(&doc, "b.c.d").unwrap(), None);
        assert_eq!(lookup(&doc, "a.b").unwrap(), None);
    }

    #[test]
    fn lookup_rejects_malformed_path() {
        let doc = json!({"a": 1});
        assert!(lookup(&doc, "a..b").is_err());
    }

    #[derive(Serialize)]
    struct Owner {
        name: String,
    }

    #[derive(Serialize)]
    struct Record {
        #[serde(rename = "id")]
        identifier: u32,
        owner: Owner,
        tags: Vec<String>,
    }

    #[test]
    fn serialized_uses_serde_names() {
        let record = Record {
            identifier: 7,
            owner: Owner {
                name: "ada".into(),
            },
            tags: vec!["x".into()],
        };

        assert_eq!(
            serialized(&record, "id").unwrap(),
            Some(Value::Number(Number::I64(7)))
        );
        assert_eq!(serialized(&record, "identifier").unwrap(), None);
        assert_eq!(
            serialized(&record, "owner.name").unwrap(),
            Some(Value::from("ada"))
        );
        assert_eq!(
            serialized(&record, "tags").unwrap().and_then(|v| v.len()),
            Some(1)
        );
    }

    #[test]
    fn serialized_reports_serialization_failure() {
        // JSON object keys must be strings
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(
            serialized(&map, "x"),
            Err(Error::Extraction { .. })
        ));
    }

    struct Pair {
        left: i32,
    }

    impl FieldAccessor for Pair {
        fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
            Ok(match field {
                "left" => Some(self.left.to_value()),
                _ => None,
            })
        }
    }

    #[test]
    fn references_and_boxes_delegate() {
        let pair = Pair { left: 1 };
        let boxed: Box<Pair> = Box::new(Pair { left: 2 });
        assert_eq!(
            (&pair).field_value("left").unwrap(),
            Some(Value::Number(Number::I64(1)))
        );
        assert_eq!(
            boxed.field_value("left").unwrap(),
            Some(Value::Number(Number::I64(2)))
        );
        assert_eq!(Pair::accessor(&pair, "right").unwrap(), None);
    }

    #[test]
    fn absent_nested_record_is_null() {
        let missing: Option<Pair> = None;
        assert_eq!(missing.field_value("left").unwrap(), Some(Value::Null));
        assert_eq!(missing.self_value(), Value::Null);
        assert!(missing.field_value("left..x").is_err());

        let present = Some(Pair { left: 3 });
        assert_eq!(
            present.field_value("left").unwrap(),
            Some(Value::Number(Number::I64(3)))
        );
        assert_eq!(present.self_value(), Value::Unsupported);
    }

    struct Known;

    impl FieldAccessor for Known {
        fn field_value(&self, field: &str) -> Result<Option<Value<'_>>> {
            Ok((field == "id").then_some(Value::Null))
        }

        fn has_field(field: &str) -> Result<bool> {
            Ok(field == "id")
        }
    }

    #[test]
    fn absent_record_keeps_unknown_fields_missing() {
        let missing: Option<Known> = None;
        assert_eq!(missing.field_value("id").unwrap(), Some(Value::Null));
        assert_eq!(missing.field_value("bogus").unwrap(), None);
        assert_eq!(Some(Known).field_value("bogus").unwrap(), None);
    }

    #[test]
    fn json_documents_are_their_own_value() {
        let doc = json!([1, 2]);
        assert_eq!(doc.self_value().len(), Some(2));
    }
}
