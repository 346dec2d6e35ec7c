use bincode::{Decode, Encode};
use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::Value;

/// A loosely typed scalar as it appears in the raw inputs. Tree files carry
/// these directly; dataset rows convert in via [`RawValue::from_json`].
///
/// Everything downstream goes through the coercion functions below, so no
/// other module needs to re-check for missing or oddly typed fields.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl RawValue {
    /// Arrays and objects carry no scalar meaning here and degrade to Null.
    pub fn from_json(value: &Value) -> RawValue {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    RawValue::Float(f)
                } else {
                    RawValue::Null
                }
            }
            Value::String(s) => RawValue::Str(s.clone()),
            _ => RawValue::Null,
        }
    }
}

/// Coerce a raw value to a canonical string. Strings are trimmed, integers
/// stringified, NaN floats become empty, and anything else degrades to the
/// empty string. Whole-valued floats render without a fractional part.
pub fn coerce_string(value: Option<&RawValue>) -> String {
    match value {
        Some(RawValue::Str(s)) => s.trim().to_string(),
        Some(RawValue::Int(i)) => i.to_string(),
        Some(RawValue::Float(f)) => {
            if f.is_nan() {
                String::new()
            } else {
                f.to_string()
            }
        }
        _ => String::new(),
    }
}

/// Coerce a raw value to an integer. Booleans map to 0/1, floats truncate,
/// numeric-looking strings parse via float-then-truncate, and every failure
/// path degrades to 0.
pub fn coerce_int(value: Option<&RawValue>) -> i64 {
    match value {
        Some(RawValue::Bool(b)) => i64::from(*b),
        Some(RawValue::Int(i)) => *i,
        Some(RawValue::Float(f)) => {
            if f.is_finite() {
                *f as i64
            } else {
                0
            }
        }
        Some(RawValue::Str(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Coerce a raw value to a float; unparsable or non-finite inputs degrade
/// to 0.0.
pub fn coerce_float(value: Option<&RawValue>) -> f64 {
    match value {
        Some(RawValue::Bool(b)) => f64::from(u8::from(*b)),
        Some(RawValue::Int(i)) => *i as f64,
        Some(RawValue::Float(f)) => {
            if f.is_nan() {
                0.0
            } else {
                *f
            }
        }
        Some(RawValue::Str(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| !f.is_nan())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// True iff the text, after stripping leading whitespace, starts with the
/// retweet marker "rt @" (case-insensitive).
pub fn detect_retweet(text: &str) -> bool {
    let snippet = text.trim_start();
    snippet
        .as_bytes()
        .get(..4)
        .is_some_and(|head| head.eq_ignore_ascii_case(b"rt @"))
}

/// Normalize a creation timestamp to an ISO-8601 string, or None when the
/// value is absent or blank. Non-empty strings are kept as-is (trimmed);
/// integers are read as unix epoch seconds and rendered in UTC, falling back
/// to plain stringification when out of chrono's range.
pub fn normalize_created_at(value: Option<&RawValue>) -> Option<String> {
    match value {
        Some(RawValue::Str(s)) => {
            let text = s.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        Some(RawValue::Int(i)) => Some(
            Utc.timestamp_opt(*i, 0)
                .single()
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_else(|| i.to_string()),
        ),
        Some(RawValue::Float(f)) => {
            if f.is_nan() {
                None
            } else {
                Some(f.to_string())
            }
        }
        _ => None,
    }
}
