//! JSON codec for row payloads

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// Serialization options used when exchanging rows with the Web API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializerOptions {
    /// Drop object members whose value is `null`
    pub omit_nulls: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self { omit_nulls: true }
    }
}

impl SerializerOptions {
    /// Keep explicit nulls, e.g. to clear a column on update
    pub fn keep_nulls() -> Self {
        Self { omit_nulls: false }
    }
}

/// Serialize a row to JSON bytes
pub fn to_json_vec<T: Serialize + ?Sized>(row: &T, options: &SerializerOptions) -> Result<Vec<u8>> {
    if !options.omit_nulls {
        return Ok(serde_json::to_vec(row)?);
    }

    let mut value = serde_json::to_value(row)?;
    strip_nulls(&mut value);
    Ok(serde_json::to_vec(&value)?)
}

/// Deserialize a row from JSON bytes
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        // Positions in an array are meaningful; only nested objects are cleaned.
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
