//! Native value -> encoded value

use super::wrapper::EncodedValue;
use crate::types::{EncodedRow, Row, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::SecondsFormat;
use serde_json::{Number, Value as JsonValue};

/// Encodes a single column value.
pub fn encode_value(value: &Value) -> EncodedValue {
    match value {
        Value::Null => EncodedValue::Plain(JsonValue::Null),
        Value::Bool(b) => EncodedValue::Plain(JsonValue::Bool(*b)),
        Value::Integer(i) => EncodedValue::Plain(JsonValue::Number((*i).into())),
        // JSON cannot carry NaN or infinities; they are written as null
        Value::Real(f) => EncodedValue::Plain(
            Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
        ),
        Value::Text(s) => EncodedValue::Plain(JsonValue::String(s.clone())),
        Value::Array(items) => EncodedValue::Plain(JsonValue::Array(items.clone())),
        Value::BigInt(i) => EncodedValue::BigInt(i.to_string()),
        Value::DateTime(dt) => {
            EncodedValue::DateTime(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        }
        Value::Bytes(bytes) => EncodedValue::Bytes(STANDARD.encode(bytes)),
        Value::Decimal(s) => EncodedValue::Decimal(s.clone()),
        Value::Json(v) => EncodedValue::Json(v.clone()),
    }
}

/// Encodes every column of a row.
pub fn encode_row(row: &Row) -> EncodedRow {
    row.iter()
        .map(|(column, value)| (column.clone(), encode_value(value)))
        .collect()
}
