use serde::de::DeserializeOwned;

use crate::error::{CoreError, TransportError};

/// Extract the application-level error string the remote service embeds in
/// otherwise well-formed bodies. Absent, null and empty all mean "no error".
pub(crate) fn remote_error(raw: &serde_json::Value) -> Option<&str> {
    raw.get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
}

/// Fail with `CoreError::Remote` if the body carries an error string.
pub(crate) fn check_remote_error(raw: &serde_json::Value) -> Result<(), CoreError> {
    match remote_error(raw) {
        Some(message) => Err(CoreError::Remote(message.to_owned())),
        None => Ok(()),
    }
}

/// Deserialize a JSON value into a typed record, mapping failures to an
/// invalid-response transport error that names what was being decoded.
pub(crate) fn decode<T: DeserializeOwned>(
    raw: serde_json::Value,
    what: &str,
) -> Result<T, CoreError> {
    serde_json::from_value(raw)
        .map_err(|e| TransportError::InvalidResponse(format!("decode {what}: {e}")).into())
}
