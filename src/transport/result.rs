use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::value::RawValue;

use super::error::TransportError;
use crate::domain::{ApiResult, Variables};

/// Decode a single object, also accepting a one-element array around it.
///
/// Several `GET .../{id}` endpoints wrap the single result in a list.
pub fn decode_one<T: DeserializeOwned>(json: &str, field: &'static str) -> Result<T, TransportError> {
    let raw: Box<RawValue> = serde_json::from_str(json)?;
    if raw.get().starts_with('[') {
        let items: Vec<T> = serde_json::from_str(raw.get())?;
        return items
            .into_iter()
            .next()
            .ok_or(TransportError::MissingField { field });
    }
    Ok(serde_json::from_str(raw.get())?)
}

/// Keep only the fields of a JSON object, dropping `[]` used for empty maps.
pub fn object_or_empty(value: Option<Value>) -> Variables {
    match value {
        Some(Value::Object(map)) => map.into_iter().collect(),
        _ => Variables::new(),
    }
}

pub fn decode_api_result(json: &str) -> Result<ApiResult, TransportError> {
    let mut fields: BTreeMap<String, Value> = serde_json::from_str(json)?;
    let result = fields
        .remove("result")
        .and_then(|value| value.as_bool())
        .unwrap_or(false);
    let id = fields.remove("id").and_then(|value| match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    });
    Ok(ApiResult {
        result,
        id,
        extra: fields,
    })
}
