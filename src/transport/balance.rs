use std::collections::BTreeMap;

use serde_json::Value;
use serde_json::value::RawValue;

use super::error::TransportError;
use super::scalar::scalar_from_raw;
use crate::domain::{Balance, Variables};

/// Scalars go to `fields` with raw number tokens; everything else is kept in `extra`.
pub fn decode_balance(json: &str) -> Result<Balance, TransportError> {
    let parsed: BTreeMap<String, Box<RawValue>> = serde_json::from_str(json)?;
    let mut fields = BTreeMap::new();
    let mut extra = Variables::new();
    for (key, raw) in parsed {
        match scalar_from_raw(&raw) {
            Some(value) => {
                fields.insert(key, value);
            }
            None => {
                extra.insert(key, serde_json::from_str::<Value>(raw.get())?);
            }
        }
    }
    Ok(Balance { fields, extra })
}
