//! JSON text rendering for typed values.
//!
//! JSON has no unbounded-integer literal, so [`Value::BigInt`] renders as its
//! decimal string form (`1` becomes `"1"`). This is deliberate serializer
//! configuration on the output type, not ambient process state: the policy
//! lives in the `Serialize` impl below and nowhere else. Timestamps render as
//! RFC 3339 text, `Unit` as `null`.

use serde::ser::{Serialize, Serializer};

use crate::value::Value;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null | Value::Unit => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::BigInt(value) => serializer.serialize_str(&value.to_string()),
            Value::Text(value) => serializer.serialize_str(value),
            Value::Timestamp(value) => serializer.serialize_str(&value.to_rfc3339()),
            Value::Json(value) => value.serialize(serializer),
            Value::Array(items) => serializer.collect_seq(items),
            Value::Record(record) => serializer.collect_map(record.iter()),
        }
    }
}

/// Render a value as compact JSON text.
pub fn to_json_string(value: &Value) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Render a value as a `serde_json::Value` tree under the same policy.
pub fn to_json_value(value: &Value) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(value)
}
