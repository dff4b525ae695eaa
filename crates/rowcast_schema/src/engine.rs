//! The unmarshalling engine.
//!
//! One recursive algorithm shared by every field kind:
//!
//! 1. Classify the raw input as absent-like (missing, `null`, or `""` -
//!    never `false`, never `0`).
//! 2. If absent-like, resolve the field's default rule; a forbidden outcome
//!    is a [`UnmarshalError::NullNotAllowed`] carrying the path.
//! 3. Otherwise dispatch to the kind-specific conversion.
//!
//! Object fields match declared names against raw keys under three naming
//! conventions and emit a key only when the input supplied a value or the
//! nested default produces one; array fields convert each element
//! independently. Paths are `::`-joined breadcrumbs for diagnostics only.

use rowcast_value::{Record, Value};
use serde_json::{Map, Value as Raw};
use tracing::trace;

use crate::convert;
use crate::defaults::Resolved;
use crate::error::UnmarshalError;
use crate::field::{Field, FieldKind};

/// Unmarshal a raw value against a schema field.
pub fn unmarshal(field: &Field, raw: &Raw) -> Result<Value, UnmarshalError> {
    unmarshal_at(field, Some(raw), "")
}

/// Unmarshal against a bare named-field mapping, implicitly wrapped in an
/// object field.
pub fn unmarshal_record<K, I>(fields: I, raw: &Raw) -> Result<Value, UnmarshalError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Field)>,
{
    unmarshal(&Field::object(fields), raw)
}

// `None` is a missing object key or no input at all; `Some` is whatever the
// raw record held, which may still be absent-like.
fn unmarshal_at(field: &Field, raw: Option<&Raw>, path: &str) -> Result<Value, UnmarshalError> {
    match raw {
        Some(value) if !is_absent_like(value) => convert_present(field, value, path),
        _ => apply_default(field, path),
    }
}

/// Absence classification: missing, JSON `null`, or the empty string.
///
/// `false` and `0` are legitimate values that would look "falsy" under a
/// truthiness test; they are present by construction here since only the
/// string variant is inspected for emptiness.
fn is_absent_like(raw: &Raw) -> bool {
    match raw {
        Raw::Null => true,
        Raw::String(text) => text.is_empty(),
        _ => false,
    }
}

fn apply_default(field: &Field, path: &str) -> Result<Value, UnmarshalError> {
    match field.default_rule().resolve() {
        Resolved::Forbidden => {
            trace!(path, "absent value hit forbidden-null default");
            Err(UnmarshalError::null_not_allowed(path))
        }
        Resolved::Null => Ok(Value::Null),
        Resolved::Value(value) => Ok(value),
    }
}

fn convert_present(field: &Field, raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    trace!(path, kind = field.kind().name(), "converting value");
    match field.kind() {
        FieldKind::Integer => convert::integer(raw, path),
        FieldKind::Float => convert::float(raw, path),
        FieldKind::BigInt => convert::big_integer(raw, path),
        FieldKind::Text => convert::text(raw, path),
        FieldKind::Boolean => Ok(convert::boolean(raw)),
        FieldKind::Timestamp => convert::timestamp(raw, path),
        FieldKind::Json => convert::json(raw, path),
        FieldKind::Void => Ok(convert::void()),
        FieldKind::Array(element) => convert_array(element, raw, path),
        FieldKind::Object(fields) => convert_object(fields, raw, path),
    }
}

fn convert_array(element: &Field, raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    let Raw::Array(items) = raw else {
        return Err(UnmarshalError::conversion(path, "array", raw));
    };
    let mut converted = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        // Each element resolves independently; a null element takes the
        // element schema's own default, not the array's.
        let child_path = format!("{path}::{index}");
        converted.push(unmarshal_at(element, Some(item), &child_path)?);
    }
    Ok(Value::Array(converted))
}

fn convert_object(
    fields: &[(String, Field)],
    raw: &Raw,
    path: &str,
) -> Result<Value, UnmarshalError> {
    let Raw::Object(map) = raw else {
        return Err(UnmarshalError::conversion(path, "object", raw));
    };
    let mut record = Record::new();
    for (name, nested) in fields {
        let matched = match_key(map, name);
        // Emit the key when the input supplied a value, or when the nested
        // default produces one (a forbidden default also recurses, so the
        // mandatory-field check fires on missing keys). With no match and a
        // null default the key is omitted entirely - that omission is what
        // distinguishes "never supplied" from an explicit null.
        if matched.is_some() || !nested.default_rule().resolve().is_null() {
            let child_path = format!("{path}::{name}");
            let value = unmarshal_at(nested, matched, &child_path)?;
            record.insert(name.clone(), value);
        }
    }
    // Raw keys with no declared counterpart never reach the record.
    Ok(Value::Record(record))
}

/// Resolve a declared name against the raw record: exact match first, then
/// lowercase, then camelCase rewritten as underscore-separated. First present
/// key wins, even if its value is null.
fn match_key<'a>(map: &'a Map<String, Raw>, name: &str) -> Option<&'a Raw> {
    if let Some(value) = map.get(name) {
        return Some(value);
    }
    if let Some(value) = map.get(name.to_lowercase().as_str()) {
        return Some(value);
    }
    map.get(underscore_separated(name).as_str())
}

// camelCase -> underscore-separated: an underscore before every internal
// uppercase letter, everything lowercased ("unJour" -> "un_jour").
fn underscore_separated(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() && index > 0 {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_like_covers_null_and_empty_string_only() {
        assert!(is_absent_like(&json!(null)));
        assert!(is_absent_like(&json!("")));
        assert!(!is_absent_like(&json!(false)));
        assert!(!is_absent_like(&json!(0)));
        assert!(!is_absent_like(&json!(0.0)));
        assert!(!is_absent_like(&json!("0")));
        assert!(!is_absent_like(&json!([])));
        assert!(!is_absent_like(&json!({})));
    }

    #[test]
    fn underscore_rewrite_handles_internal_uppercase() {
        assert_eq!(underscore_separated("unJour"), "un_jour");
        assert_eq!(underscore_separated("somethingBigHere"), "something_big_here");
        assert_eq!(underscore_separated("plain"), "plain");
        // A leading capital is not internal; it just lowercases.
        assert_eq!(underscore_separated("Foo"), "foo");
    }

    #[test]
    fn exact_key_wins_over_lowercase_fallback() {
        let schema = Field::object([("Foo", Field::integer())]);
        let result = unmarshal(&schema, &json!({"Foo": 1, "foo": 2})).unwrap();
        let record = result.as_record().unwrap();
        assert_eq!(record.get("Foo"), Some(&Value::Int(1)));
    }

    #[test]
    fn lowercase_beats_underscored_fallback() {
        let schema = Field::object([("unJour", Field::integer())]);
        let result = unmarshal(&schema, &json!({"unjour": 1, "un_jour": 2})).unwrap();
        let record = result.as_record().unwrap();
        assert_eq!(record.get("unJour"), Some(&Value::Int(1)));
    }

    #[test]
    fn underscored_key_matches_when_nothing_else_does() {
        let schema = Field::object([("unJour", Field::integer())]);
        let result = unmarshal(&schema, &json!({"un_jour": 2})).unwrap();
        let record = result.as_record().unwrap();
        assert_eq!(record.get("unJour"), Some(&Value::Int(2)));
    }

    #[test]
    fn non_array_input_for_array_field_is_a_conversion_error() {
        let schema = Field::array(Field::integer());
        let err = unmarshal(&schema, &json!("not a list")).unwrap_err();
        assert!(matches!(err, UnmarshalError::Conversion { expected: "array", .. }));
    }

    #[test]
    fn non_object_input_for_object_field_is_a_conversion_error() {
        let schema = Field::object([("a", Field::integer())]);
        let err = unmarshal(&schema, &json!(42)).unwrap_err();
        assert!(matches!(err, UnmarshalError::Conversion { expected: "object", .. }));
    }

    #[test]
    fn error_path_points_at_the_failing_element() {
        let schema = Field::object([(
            "items",
            Field::array(Field::object([("qty", Field::integer().required())])),
        )]);
        let raw = json!({"items": [{"qty": 1}, {}]});
        let err = unmarshal(&schema, &raw).unwrap_err();
        assert_eq!(err.path(), "::items::1::qty");
    }

    #[test]
    fn zero_and_false_survive_as_values() {
        let schema = Field::object([
            ("count", Field::integer().required()),
            ("flag", Field::boolean().required()),
        ]);
        let result = unmarshal(&schema, &json!({"count": 0, "flag": false})).unwrap();
        let record = result.as_record().unwrap();
        assert_eq!(record.get("count"), Some(&Value::Int(0)));
        assert_eq!(record.get("flag"), Some(&Value::Bool(false)));
    }

    #[test]
    fn empty_string_resolves_through_the_default() {
        let schema = Field::text().default_value("fallback");
        let result = unmarshal(&schema, &json!("")).unwrap();
        assert_eq!(result, Value::Text("fallback".into()));
    }
}
