//! Truthiness over the raw input domain.

/// Boolean reading of a raw value.
///
/// `null`, `false`, `0`, and `""` are false; everything else - including
/// empty arrays and empty objects - is true. This is the coercion the
/// boolean field applies to present input; absence never reaches it.
pub fn is_truthy(raw: &serde_json::Value) -> bool {
    match raw {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(value) => *value,
        serde_json::Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        serde_json::Value::String(text) => !text.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
