//! Encoded value -> native value

use super::wrapper::EncodedValue;
use crate::error::{Error, Result};
use crate::types::{EncodedRow, Row, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// Decodes a single column value.
pub fn decode_value(encoded: &EncodedValue) -> Result<Value> {
    match encoded {
        EncodedValue::Plain(v) => Ok(from_plain(v)),
        EncodedValue::Bytes(s) => STANDARD
            .decode(s)
            .map(Value::Bytes)
            .map_err(|e| Error::codec("bytes", e)),
        EncodedValue::BigInt(s) => decode_bigint(s),
        EncodedValue::DateTime(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Value::DateTime(dt.with_timezone(&Utc)))
            .map_err(|e| Error::codec("datetime", format!("{s}: {e}"))),
        EncodedValue::Decimal(s) => Ok(Value::Decimal(s.clone())),
        EncodedValue::Json(v) => Ok(Value::Json(v.clone())),
        EncodedValue::Unknown { kind, payload } => {
            tracing::debug!("Unknown value tag {kind}, using raw payload");
            Ok(from_plain(payload))
        }
    }
}

/// Decodes every column of a row.
pub fn decode_row(row: &EncodedRow) -> Result<Row> {
    row.iter()
        .map(|(column, value)| Ok((column.clone(), decode_value(value)?)))
        .collect()
}

fn from_plain(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(u) = n.as_u64() {
                Value::BigInt(u as i128)
            } else {
                Value::Real(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(items) => Value::Array(items.clone()),
        JsonValue::Object(_) => Value::Json(value.clone()),
    }
}

/// Digit strings wider than i128 are kept verbatim as an exact decimal.
fn decode_bigint(s: &str) -> Result<Value> {
    if let Ok(i) = s.parse::<i128>() {
        return Ok(Value::BigInt(i));
    }

    let digits = s.strip_prefix('-').unwrap_or(s);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(Value::Decimal(s.to_string()));
    }

    Err(Error::codec("bigint", format!("not an integer: {s:?}")))
}
