//! Response envelope normalization.
//!
//! List endpoints answer in one of three shapes: a bare array,
//! `{ "success": true, "data": [...] }`, or an object keyed by the entity
//! name (`{ "success": true, "orders": [...] }`). Callers name the key they
//! expect and get the list back whatever the shape.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;

/// Pull the list out of `value`.
///
/// Lookup order: bare array, then `key`, then `data`. A body with
/// `success: false` and no list is an error rather than an empty list.
pub fn extract_list<T: DeserializeOwned>(
    value: Value,
    key: &str,
    endpoint: &str,
) -> Result<Vec<T>, ApiError> {
    let list = match value {
        list @ Value::Array(_) => list,
        Value::Object(mut map) => match map.remove(key).or_else(|| map.remove("data")) {
            Some(list @ Value::Array(_)) => list,
            Some(Value::Null) | None if map.get("success") == Some(&Value::Bool(true)) => {
                tracing::warn!(endpoint, key, "successful response without a list, treating as empty");
                return Ok(Vec::new());
            }
            Some(other) => {
                return Err(unexpected(endpoint, format!("'{key}' is {}", kind(&other))));
            }
            None => {
                return Err(unexpected(
                    endpoint,
                    format!("no '{key}' or 'data' list in response"),
                ));
            }
        },
        other => {
            return Err(unexpected(endpoint, format!("expected a list, got {}", kind(&other))));
        }
    };

    decode(list, endpoint)
}

/// Pull a single object out of `value`: `value[key]`, `value.data`, or the
/// body itself.
pub fn extract_object<T: DeserializeOwned>(
    value: Value,
    key: &str,
    endpoint: &str,
) -> Result<T, ApiError> {
    let inner = match value {
        Value::Object(mut map) => {
            if map.get(key).is_some_and(Value::is_object) {
                map.remove(key).unwrap_or_default()
            } else if map.get("data").is_some_and(Value::is_object) {
                map.remove("data").unwrap_or_default()
            } else {
                Value::Object(map)
            }
        }
        other => other,
    };
    decode(inner, endpoint)
}

pub fn decode<T: DeserializeOwned>(value: Value, endpoint: &str) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| unexpected(endpoint, e.to_string()))
}

fn unexpected(endpoint: &str, detail: String) -> ApiError {
    ApiError::UnexpectedShape {
        endpoint: endpoint.to_string(),
        detail,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
