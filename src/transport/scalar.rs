use serde::Deserialize;
use serde::de::Error as DeError;
use serde_json::Value;
use serde_json::value::RawValue;

/// Scalar returned by the API as either JSON string or JSON number.
///
/// For numbers, the raw JSON token is preserved to avoid formatting drift
/// (`10.00` remains `"10.00"` instead of becoming `"10.0"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportScalar(String);

impl TransportScalar {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportScalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<RawValue> = Deserialize::deserialize(deserializer)?;
        scalar_from_raw(&raw)
            .map(Self)
            .ok_or_else(|| D::Error::custom("expected JSON string or number"))
    }
}

/// String or number token as text; `None` for anything else.
pub fn scalar_from_raw(raw: &RawValue) -> Option<String> {
    let token = raw.get();
    match token.as_bytes().first().copied() {
        Some(b'"') => serde_json::from_str::<String>(token).ok(),
        Some(b'-' | b'0'..=b'9') => Some(token.to_owned()),
        _ => None,
    }
}

/// Same as [`scalar_from_raw`] for already-parsed values. Numbers are re-rendered.
pub fn scalar_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}
