//! Helpers for reading loosely-typed JSON records.
//!
//! Missing required fields are `MalformedInput`. An explicit `null` for an
//! optional field reads as absent. Malformed hex inside a present field
//! surfaces as `Conversion`.

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::types::{H160, H256, U256};

pub(crate) type Object = Map<String, Value>;

pub(crate) fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| CoreError::malformed(format!("{} must be an object", what)))
}

pub(crate) fn required<'a>(obj: &'a Object, key: &str) -> Result<&'a Value> {
    match obj.get(key) {
        Some(Value::Null) | None => Err(CoreError::malformed(format!("missing field `{}`", key))),
        Some(v) => Ok(v),
    }
}

pub(crate) fn optional<'a>(obj: &'a Object, key: &str) -> Option<&'a Value> {
    match obj.get(key) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v),
    }
}

pub(crate) fn string(value: &Value, key: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CoreError::malformed(format!("`{}` must be a string", key)))
}

pub(crate) fn array<'a>(value: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| CoreError::malformed(format!("`{}` must be an array", key)))
}

pub(crate) fn h160(value: &Value, key: &str) -> Result<H160> {
    H160::from_hex(&string(value, key)?)
}

pub(crate) fn h256(value: &Value, key: &str) -> Result<H256> {
    H256::from_hex(&string(value, key)?)
}

pub(crate) fn uint(value: &Value) -> Result<U256> {
    U256::from_json(value)
}

pub(crate) fn u64(value: &Value, key: &str) -> Result<u64> {
    uint(value)?
        .to_u64()
        .ok_or_else(|| CoreError::conversion(format!("`{}` does not fit in u64", key)))
}

/// `0x`-prefixed hex bytes.
pub(crate) fn bytes(value: &Value, key: &str) -> Result<Bytes> {
    let s = string(value, key)?;
    let digits = s.strip_prefix("0x").unwrap_or(&s);
    Ok(Bytes::from(hex::decode(digits)?))
}

pub(crate) fn bytes_list(value: &Value, key: &str) -> Result<Vec<Bytes>> {
    array(value, key)?
        .iter()
        .map(|item| bytes(item, key))
        .collect()
}

pub(crate) fn hex_bytes(bytes: &[u8]) -> Value {
    Value::String(format!("0x{}", hex::encode(bytes)))
}

pub(crate) fn hex_id(id: impl AsRef<[u8]>) -> Value {
    hex_bytes(id.as_ref())
}
