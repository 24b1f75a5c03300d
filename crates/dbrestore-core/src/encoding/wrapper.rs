//! Tagged wrapper representation

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as JsonValue};

/// Key holding the wrapper's kind.
pub const TYPE_TAG: &str = "__type";

/// Key holding the wrapper's payload.
pub const VALUE_KEY: &str = "value";

/// A column value as stored in a dump file.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedValue {
    /// JSON-native value written as-is
    Plain(JsonValue),
    /// Base64 of the raw bytes
    Bytes(String),
    /// Decimal digit string
    BigInt(String),
    /// ISO-8601 UTC instant
    DateTime(String),
    /// Exact decimal literal
    Decimal(String),
    /// Structured value, wrapped once
    Json(JsonValue),
    /// Wrapper with a tag this version does not know
    Unknown { kind: String, payload: JsonValue },
}

impl EncodedValue {
    /// Tag written on the wire, `None` for plain values.
    pub fn kind(&self) -> Option<&str> {
        match self {
            EncodedValue::Plain(_) => None,
            EncodedValue::Bytes(_) => Some("bytes"),
            EncodedValue::BigInt(_) => Some("bigint"),
            EncodedValue::DateTime(_) => Some("datetime"),
            EncodedValue::Decimal(_) => Some("decimal"),
            EncodedValue::Json(_) => Some("json"),
            EncodedValue::Unknown { kind, .. } => Some(kind),
        }
    }

    pub fn is_wrapped(&self) -> bool {
        !matches!(self, EncodedValue::Plain(_))
    }

    /// Classifies a raw JSON value.
    ///
    /// Any object carrying both `__type` and `value` is a wrapper. Known
    /// string-payload kinds whose payload is not a string are kept as
    /// `Unknown` and degrade to the payload on decode.
    pub fn from_json(value: JsonValue) -> Self {
        let mut map = match value {
            JsonValue::Object(map) => map,
            other => return EncodedValue::Plain(other),
        };

        if !(map.contains_key(TYPE_TAG) && map.contains_key(VALUE_KEY)) {
            return EncodedValue::Plain(JsonValue::Object(map));
        }

        let tag = map.remove(TYPE_TAG).unwrap_or(JsonValue::Null);
        let payload = map.remove(VALUE_KEY).unwrap_or(JsonValue::Null);

        let kind = match tag {
            JsonValue::String(s) => s,
            other => other.to_string(),
        };

        match (kind.as_str(), payload) {
            ("json", payload) => EncodedValue::Json(payload),
            ("bytes", JsonValue::String(s)) => EncodedValue::Bytes(s),
            ("bigint", JsonValue::String(s)) => EncodedValue::BigInt(s),
            ("datetime", JsonValue::String(s)) => EncodedValue::DateTime(s),
            ("decimal", JsonValue::String(s)) => EncodedValue::Decimal(s),
            (_, payload) => EncodedValue::Unknown { kind, payload },
        }
    }

    /// Wire representation.
    pub fn to_json(&self) -> JsonValue {
        match self {
            EncodedValue::Plain(v) => v.clone(),
            EncodedValue::Bytes(s)
            | EncodedValue::BigInt(s)
            | EncodedValue::DateTime(s)
            | EncodedValue::Decimal(s) => wrap(self.kind().unwrap_or_default(), json!(s)),
            EncodedValue::Json(v) => wrap("json", v.clone()),
            EncodedValue::Unknown { kind, payload } => wrap(kind, payload.clone()),
        }
    }
}

fn wrap(kind: &str, payload: JsonValue) -> JsonValue {
    json!({ TYPE_TAG: kind, VALUE_KEY: payload })
}

impl From<JsonValue> for EncodedValue {
    fn from(value: JsonValue) -> Self {
        EncodedValue::from_json(value)
    }
}

impl Serialize for EncodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EncodedValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(EncodedValue::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let encoded = EncodedValue::BigInt("9007199254740993".to_string());
        assert_eq!(
            encoded.to_json(),
            json!({"__type": "bigint", "value": "9007199254740993"})
        );
    }

    #[test]
    fn test_plain_values_stay_plain() {
        for raw in [json!(1), json!("x"), json!(true), json!(null), json!([1, 2])] {
            let encoded = EncodedValue::from_json(raw.clone());
            assert_eq!(encoded, EncodedValue::Plain(raw));
            assert!(!encoded.is_wrapped());
        }
    }

    #[test]
    fn test_object_missing_value_key_is_plain() {
        let raw = json!({"__type": "bytes", "data": "AAEC"});
        assert_eq!(
            EncodedValue::from_json(raw.clone()),
            EncodedValue::Plain(raw)
        );
    }

    #[test]
    fn test_unknown_tag_is_preserved() {
        let raw = json!({"__type": "interval", "value": "1 day"});
        let encoded = EncodedValue::from_json(raw.clone());
        assert_eq!(encoded.kind(), Some("interval"));
        assert_eq!(encoded.to_json(), raw);
    }

    #[test]
    fn test_known_tag_with_wrong_payload_type() {
        let encoded = EncodedValue::from_json(json!({"__type": "bytes", "value": 12}));
        assert!(matches!(encoded, EncodedValue::Unknown { .. }));
    }

    #[test]
    fn test_serde_round_trip() {
        let encoded = EncodedValue::Json(json!({"a": 1}));
        let text = serde_json::to_string(&encoded).unwrap();
        let back: EncodedValue = serde_json::from_str(&text).unwrap();
        assert_eq!(back, encoded);
    }
}
