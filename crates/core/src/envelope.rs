//! Backend responses arrive either bare or wrapped as `{ "success", "message", "data" }`.
//! Everything the client returns goes through [`unwrap_envelope`] exactly once, so the
//! rest of the system only ever sees the typed payload.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{AttendanceError, AttendanceResult};

const DATA_KEY: &str = "data";

/// Extracts the typed payload from a raw backend response body.
///
/// A JSON object with a `data` key is treated as an envelope: a `success: false`
/// envelope becomes a validation error carrying the backend message, otherwise `data`
/// is decoded. Any other value is decoded as the payload itself.
pub fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> AttendanceResult<T> {
    let payload = match body {
        Value::Object(mut map) if map.contains_key(DATA_KEY) => {
            if map.get("success").and_then(Value::as_bool) == Some(false) {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Request was rejected by the attendance backend")
                    .to_string();
                return Err(AttendanceError::Validation(message));
            }
            map.remove(DATA_KEY).unwrap_or(Value::Null)
        }
        other => other,
    };

    serde_json::from_value(payload).map_err(|e| {
        AttendanceError::Backend(eyre::eyre!("Unexpected response shape: {}", e))
    })
}

/// Same as [`unwrap_envelope`], from raw bytes. An empty body decodes as `null`.
pub fn unwrap_body<T: DeserializeOwned>(body: &[u8]) -> AttendanceResult<T> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body).map_err(|e| {
            AttendanceError::Backend(eyre::eyre!("Response is not valid JSON: {}", e))
        })?
    };
    unwrap_envelope(value)
}
