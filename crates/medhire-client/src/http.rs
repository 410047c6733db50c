//! Response normalization.
//!
//! Centralizes the status check so every endpoint fails the same way:
//! non-2xx → [`ApiError::Status`] carrying the body's `message` (or the
//! transport text when the body has none) plus any field errors; 2xx with a
//! non-JSON body → [`ApiError::Decode`].

use medhire_core::FieldError;
use serde_json::Value;

use crate::error::ApiError;

/// Read a response into JSON, turning failure statuses into [`ApiError`].
///
/// An empty 2xx body (e.g. `204 No Content`) reads as `Value::Null`.
pub async fn read_response(resp: reqwest::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(failure_from_body(status.as_u16(), &text));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Build the error for a non-2xx response.
pub fn failure_from_body(status: u16, body: &str) -> ApiError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map_or_else(|| transport_text(status), str::to_string);

    let errors = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .map(parse_field_errors)
        .unwrap_or_default();

    ApiError::Status {
        status,
        message,
        errors,
    }
}

/// Text used when the backend gave no message of its own.
pub fn transport_text(status: u16) -> String {
    format!("Request failed with status code {status}")
}

/// Accept both `[{field, message}]` and `{field: [messages]}` shapes.
pub fn parse_field_errors(value: &Value) -> Vec<FieldError> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<FieldError>(item.clone()).ok())
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(field, messages)| {
                let message = match messages {
                    Value::String(s) => s.clone(),
                    Value::Array(list) => list.iter().find_map(Value::as_str)?.to_string(),
                    _ => return None,
                };
                Some(FieldError {
                    field: field.clone(),
                    message,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}
