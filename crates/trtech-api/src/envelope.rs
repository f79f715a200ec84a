//! The backend's `{success, data, message}` response envelope.

use crate::error::{ApiError, DEFAULT_ERROR_MESSAGE};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body into `T`.
///
/// Non-2xx statuses and `success: false` bodies become errors carrying the
/// body's `message`. A body with a `data` field yields that field; any
/// other body is decoded as a whole.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(body) {
            Ok(v) => v,
            Err(e) if (200..300).contains(&status) => return Err(e.into()),
            Err(_) => Value::Null,
        }
    };

    if !(200..300).contains(&status) {
        return Err(ApiError::Http {
            status,
            message: message_of(&value),
        });
    }

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Rejected(message_of(&value)));
    }

    let payload = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(payload).map_err(ApiError::from)
}

/// Check a response that carries no payload of interest.
pub fn decode_empty(status: u16, body: &str) -> Result<(), ApiError> {
    decode::<Value>(status, body).map(|_| ())
}

fn message_of(value: &Value) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_ERROR_MESSAGE)
        .to_string()
}
