//! Readers for the loosely-typed attribute maps the payload constructors
//! accept. A `null` value is treated the same as an absent key.

use serde_json::{Map, Value};

use crate::error::MessageError;

/// Human-readable name for a JSON value's shape, used in error messages.
pub(crate) fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Interpret `value` as an attribute map for `entity`.
pub(crate) fn attribute_map<'a>(
    value: &'a Value,
    entity: &'static str,
) -> Result<&'a Map<String, Value>, MessageError> {
    value.as_object().ok_or(MessageError::InvalidShape {
        entity,
        found: shape_of(value),
    })
}

/// Read an optional string attribute.
pub(crate) fn string(
    attrs: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, MessageError> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(MessageError::InvalidAttribute {
            key,
            expected: "a string",
            found: shape_of(other),
        }),
    }
}

/// Read an optional boolean attribute.
pub(crate) fn boolean(
    attrs: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<bool>, MessageError> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(MessageError::InvalidAttribute {
            key,
            expected: "a boolean",
            found: shape_of(other),
        }),
    }
}

/// Read an optional integer attribute.
pub(crate) fn integer(
    attrs: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<i64>, MessageError> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or(MessageError::InvalidAttribute {
            key,
            expected: "an integer",
            found: "a number",
        }),
        Some(other) => Err(MessageError::InvalidAttribute {
            key,
            expected: "an integer",
            found: shape_of(other),
        }),
    }
}

/// Read an optional list-of-strings attribute.
pub(crate) fn string_list(
    attrs: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<Vec<String>>, MessageError> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or(MessageError::InvalidAttribute {
                        key,
                        expected: "an array of strings",
                        found: shape_of(item),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(MessageError::InvalidAttribute {
            key,
            expected: "an array of strings",
            found: shape_of(other),
        }),
    }
}

/// Read an optional array attribute, returning its raw elements.
pub(crate) fn array<'a>(
    attrs: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a Vec<Value>>, MessageError> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(other) => Err(MessageError::InvalidAttribute {
            key,
            expected: "an array",
            found: shape_of(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().expect("test map").clone()
    }

    #[test]
    fn null_counts_as_absent() {
        let attrs = map(json!({"title": null, "short": null, "ts": null, "tags": null}));
        assert_eq!(string(&attrs, "title").unwrap(), None);
        assert_eq!(boolean(&attrs, "short").unwrap(), None);
        assert_eq!(integer(&attrs, "ts").unwrap(), None);
        assert_eq!(string_list(&attrs, "tags").unwrap(), None);
    }

    #[test]
    fn wrong_types_are_rejected() {
        let attrs = map(json!({"title": 7, "short": "yes", "ts": [], "tags": "oops"}));
        assert!(matches!(
            string(&attrs, "title"),
            Err(MessageError::InvalidAttribute { key: "title", .. })
        ));
        assert!(matches!(
            boolean(&attrs, "short"),
            Err(MessageError::InvalidAttribute { key: "short", .. })
        ));
        assert!(matches!(
            integer(&attrs, "ts"),
            Err(MessageError::InvalidAttribute { key: "ts", .. })
        ));
        assert!(matches!(
            string_list(&attrs, "tags"),
            Err(MessageError::InvalidAttribute { key: "tags", .. })
        ));
    }

    #[test]
    fn string_list_rejects_mixed_elements() {
        let attrs = map(json!({"tags": ["ok", 3]}));
        assert!(matches!(
            string_list(&attrs, "tags"),
            Err(MessageError::InvalidAttribute { key: "tags", found: "a number", .. })
        ));
    }

    #[test]
    fn attribute_map_rejects_non_objects() {
        let err = attribute_map(&json!(42), "an attachment").unwrap_err();
        assert_eq!(
            err,
            MessageError::InvalidShape {
                entity: "an attachment",
                found: "a number"
            }
        );
    }
}
