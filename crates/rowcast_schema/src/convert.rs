//! Scalar conversions.
//!
//! Each converter is a pure function over present (non-absent) raw input;
//! absence handling happens in the engine before any converter runs. Numeric
//! converters read the leading numeric token of the input's textual form, the
//! lenient posture of the raw domain these values come from (`"3.456 EUR"`
//! is a float, `"12345678901234567890n"` is a big integer). A raw value with
//! no usable token is a [`UnmarshalError::Conversion`], never a panic and
//! never an opaque parse error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use num_bigint::BigInt;
use rowcast_value::{raw, Value};
use serde_json::Value as Raw;

use crate::error::UnmarshalError;

/// Sentinel instant produced for the literal raw string `"now"`.
///
/// The engine is side-effect-free and never reads the clock; consumers that
/// asked for "now" compare against this sentinel and substitute the current
/// instant at point of use.
pub fn timestamp_expecting_now() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

pub(crate) fn integer(raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    match raw {
        Raw::Number(number) => {
            if let Some(value) = number.as_i64() {
                return Ok(Value::Int(value));
            }
            if let Some(value) = number.as_u64() {
                return i64::try_from(value)
                    .map(Value::Int)
                    .map_err(|_| UnmarshalError::conversion(path, "integer", raw));
            }
            number
                .as_f64()
                .and_then(float_to_i64)
                .map(Value::Int)
                .ok_or_else(|| UnmarshalError::conversion(path, "integer", raw))
        }
        Raw::String(text) => leading_int_token(text.trim())
            .and_then(|token| token.parse::<i64>().ok())
            .map(Value::Int)
            .ok_or_else(|| UnmarshalError::conversion(path, "integer", raw)),
        _ => Err(UnmarshalError::conversion(path, "integer", raw)),
    }
}

pub(crate) fn float(raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    match raw {
        Raw::Number(number) => number
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| UnmarshalError::conversion(path, "float", raw)),
        Raw::String(text) => leading_float_token(text.trim())
            .and_then(|token| token.parse::<f64>().ok())
            .map(Value::Float)
            .ok_or_else(|| UnmarshalError::conversion(path, "float", raw)),
        _ => Err(UnmarshalError::conversion(path, "float", raw)),
    }
}

pub(crate) fn big_integer(raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    // Numbers go through their textual form too, so a fractional raw value
    // contributes its leading digit run the same way string input does.
    let text = match raw {
        Raw::Number(number) => number.to_string(),
        Raw::String(text) => text.trim().to_string(),
        _ => return Err(UnmarshalError::conversion(path, "big integer", raw)),
    };
    leading_int_token(&text)
        .and_then(|token| token.parse::<BigInt>().ok())
        .map(Value::BigInt)
        .ok_or_else(|| UnmarshalError::conversion(path, "big integer", raw))
}

pub(crate) fn text(raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    match raw {
        Raw::String(value) => Ok(Value::Text(value.clone())),
        Raw::Bool(value) => Ok(Value::Text(value.to_string())),
        Raw::Number(value) => Ok(Value::Text(value.to_string())),
        Raw::Array(_) | Raw::Object(_) => serde_json::to_string(raw)
            .map(Value::Text)
            .map_err(|_| UnmarshalError::conversion(path, "text", raw)),
        Raw::Null => Err(UnmarshalError::conversion(path, "text", raw)),
    }
}

pub(crate) fn boolean(raw: &Raw) -> Value {
    Value::Bool(raw::is_truthy(raw))
}

// Fallback layouts tried after RFC 3339, most common first. Date-only input
// is read as UTC midnight.
const DATE_TIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

pub(crate) fn timestamp(raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    match raw {
        Raw::String(text) => {
            let text = text.trim();
            if text == "now" {
                return Ok(Value::Timestamp(timestamp_expecting_now()));
            }
            parse_timestamp_text(text)
                .map(Value::Timestamp)
                .ok_or_else(|| UnmarshalError::conversion(path, "timestamp", raw))
        }
        // Numeric raw input is Unix epoch milliseconds.
        Raw::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(Value::Timestamp)
            .ok_or_else(|| UnmarshalError::conversion(path, "timestamp", raw)),
        _ => Err(UnmarshalError::conversion(path, "timestamp", raw)),
    }
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for layout in DATE_TIME_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(text, layout) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

pub(crate) fn json(raw: &Raw, path: &str) -> Result<Value, UnmarshalError> {
    match raw {
        Raw::String(text) => serde_json::from_str(text)
            .map(Value::Json)
            .map_err(|_| UnmarshalError::conversion(path, "json", raw)),
        other => Ok(Value::Json(other.clone())),
    }
}

pub(crate) fn void() -> Value {
    Value::Unit
}

fn float_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up; stay strictly inside the exact range.
    if truncated >= -9_007_199_254_740_992.0 && truncated <= 9_007_199_254_740_992.0 {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Leading `-?digits` run, the raw domain's integer reading of mixed text.
fn leading_int_token(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits = count_digits(&bytes[end..]);
    if digits == 0 {
        return None;
    }
    Some(&text[..end + digits])
}

/// Leading float token: sign, digits, fraction, optional exponent. At least
/// one mantissa digit is required; a bare exponent is ignored.
fn leading_float_token(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    Some(&text[..end])
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
