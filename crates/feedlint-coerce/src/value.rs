//! Value-level coercion rules.
//!
//! Each rule returns `Some(replacement)` only when the representation would
//! actually change; canonical values and uncoercible values both return
//! `None`, so callers log exactly the real changes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Number, Value};

/// The textual JSON type name used in coercion records.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Booleans: numbers and the usual affirmative/negative strings.
pub fn coerce_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => None,
        Value::Number(n) => {
            let truthy = n.as_f64().map(|f| f != 0.0).unwrap_or(false);
            Some(Value::Bool(truthy))
        }
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(Value::Bool(true)),
            "false" | "0" | "no" | "off" | "" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

/// Integers: numeric strings, integer-parse first, float-truncate fallback.
/// Numbers are already canonical and pass through.
pub fn coerce_int(value: &Value) -> Option<Value> {
    let Value::String(s) = value else {
        return None;
    };
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::Number(Number::from(i)));
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Some(Value::Number(Number::from(f as i64)));
    }
    None
}

/// Numbers: numeric strings become integers when possible, floats otherwise.
pub fn coerce_number(value: &Value) -> Option<Value> {
    let Value::String(s) = value else {
        return None;
    };
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::Number(Number::from(i)));
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Number::from_f64(f).map(Value::Number);
    }
    None
}

/// Coordinates: numeric strings parse to floats; bare integers widen.
pub fn coerce_coordinate(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) if n.is_f64() => None,
        Value::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        _ => None,
    }
}

const ALTERNATE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Timestamps: epoch ints are canonical; RFC3339 strings are kept; numeric
/// strings and a fixed list of alternate date/time formats become epoch
/// seconds; fractional epoch floats are truncated.
pub fn coerce_timestamp(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) if n.is_f64() => {
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                None
            } else {
                Some(Value::Number(Number::from(f as i64)))
            }
        }
        Value::Number(_) => None,
        Value::String(s) => {
            let trimmed = s.trim();

            if let Ok(i) = trimmed.parse::<i64>() {
                return Some(Value::Number(Number::from(i)));
            }

            if DateTime::parse_from_rfc3339(trimmed).is_ok() {
                return None;
            }

            for format in ALTERNATE_DATETIME_FORMATS {
                if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                    return Some(Value::Number(Number::from(naive.and_utc().timestamp())));
                }
            }
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                let midnight = date.and_hms_opt(0, 0, 0)?;
                return Some(Value::Number(Number::from(midnight.and_utc().timestamp())));
            }
            None
        }
        _ => None,
    }
}
